use serde::{Deserialize, Serialize};

/// A submitted CV as stored by the submission wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<UserRef>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub year_of_birth: Option<i64>,
    #[serde(default)]
    pub year_of_medical_graduation: Option<i64>,
    #[serde(default)]
    pub applying_for_job_role: String,
    #[serde(default)]
    pub target_markets: Vec<String>,
    #[serde(default)]
    pub previous_experiences: Vec<PreviousExperience>,
    #[serde(default)]
    pub research_experience: String,
    #[serde(default)]
    pub teaching_experience: String,
    #[serde(default)]
    pub teamwork_and_communication: String,
    #[serde(default)]
    pub leadership_and_management: String,
    #[serde(default)]
    pub publications_and_presentations: String,
    #[serde(default)]
    pub quality_improvement_and_audit: String,
    #[serde(default)]
    pub clinical_skills_and_procedures: String,
    #[serde(default)]
    pub others: String,
    #[serde(default)]
    pub personal_statement: String,
    #[serde(default)]
    pub supporting_statement: Option<String>,
    #[serde(default)]
    pub service_level: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

impl CvRecord {
    /// Account email when the owner is populated, otherwise the email captured on the form.
    pub fn contact_email(&self) -> Option<&str> {
        match &self.user_id {
            Some(UserRef::Profile(owner)) if !owner.email.trim().is_empty() => {
                Some(owner.email.as_str())
            }
            _ => self.email.as_deref(),
        }
    }
}

/// The owning user, either populated or left as a bare object id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Profile(CvOwner),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvOwner {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousExperience {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub hospital_name: String,
    #[serde(default)]
    pub hospital_address: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
}
