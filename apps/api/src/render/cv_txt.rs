//! CV submission dumps: the plain `CV` text and the richer `LOG` variant.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::cv::CvRecord;
use crate::render::labels::{job_role_display, markets_display, short_date};
use crate::render::text_dump::TextDump;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvTextFlavor {
    /// Submission content only.
    #[default]
    Cv,
    /// Adds applicant details and submission metadata.
    Log,
}

impl CvTextFlavor {
    /// Filename prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            CvTextFlavor::Cv => "CV",
            CvTextFlavor::Log => "LOG",
        }
    }
}

pub fn cv_to_text(record: &CvRecord, flavor: CvTextFlavor, generated_at: DateTime<Utc>) -> String {
    let mut out = TextDump::new();

    out.line(format!("Service level = {}", record.service_level));
    out.line(format!("Last name = {}", record.last_name));
    out.blank();

    if flavor == CvTextFlavor::Log {
        user_info(&mut out, record);
    }

    if record.previous_experiences.is_empty() {
        out.block("PREVIOUS EXPERIENCE");
    }
    for (i, experience) in record.previous_experiences.iter().enumerate() {
        out.block(&format!("PREVIOUS EXPERIENCE {}", i + 1));
        out.field("Start Date", &short_date(&experience.start_date));
        out.field("End Date", &short_date(&experience.end_date));
        out.field("Hospital Name", &experience.hospital_name);
        out.field("Hospital Address", &experience.hospital_address);
        out.field("Job Title", &experience.job_title);
        out.blank();
        out.labelled_text("Job Description", &experience.job_description);
    }

    let free_text: [(&str, &str); 10] = [
        ("TEACHING EXPERIENCE", &record.teaching_experience),
        ("RESEARCH AND PUBLICATION EXPERIENCE", &record.research_experience),
        ("LEADERSHIP AND MANAGEMENT EXPERIENCE", &record.leadership_and_management),
        ("QIP AND AUDIT EXPERIENCE", &record.quality_improvement_and_audit),
        ("CLINICAL SKILLS AND PROCEDURE COMPETENCY", &record.clinical_skills_and_procedures),
        ("TEAMWORK AND COMMUNICATION", &record.teamwork_and_communication),
        ("PUBLICATIONS AND PRESENTATIONS", &record.publications_and_presentations),
        ("OTHERS", &record.others),
        ("PERSONAL STATEMENT", &record.personal_statement),
        ("SUPPORTING STATEMENT", record.supporting_statement.as_deref().unwrap_or_default()),
    ];
    for (label, body) in free_text {
        out.block(label);
        out.text(body);
        out.blank();
    }

    if flavor == CvTextFlavor::Log {
        out.block("SUBMISSION DETAILS");
        out.field("CV ID", record.id.trim());
        out.field("Submission Date", &short_date(&record.created_at));
        out.field("Status", &record.status);
        out.line(format!(
            "Generated: {} GMT",
            generated_at.format("%d/%m/%Y, %H:%M:%S")
        ));
    }

    out.finish()
}

fn user_info(out: &mut TextDump, record: &CvRecord) {
    out.block("USER INFO");
    out.field("First Name", &record.first_name);
    out.field("Last Name", &record.last_name);

    let combined = format!("{} {}", record.first_name.trim(), record.last_name.trim());
    let combined = combined.trim();
    let full_name = record.full_name.trim();
    if !full_name.is_empty() && full_name != combined {
        out.field("Full Name", full_name);
    }

    out.field("Email", record.contact_email().unwrap_or_default());
    if let Some(year) = record.year_of_birth.filter(|y| *y > 0) {
        out.line(format!("Year of Birth: {year}"));
    }
    if let Some(year) = record.year_of_medical_graduation.filter(|y| *y > 0) {
        out.line(format!("Year of Medical Graduation: {year}"));
    }
    if !record.applying_for_job_role.trim().is_empty() {
        out.field(
            "Applying for Job Role",
            job_role_display(&record.applying_for_job_role),
        );
    }
    out.field("Target Markets", &markets_display(&record.target_markets));
    out.blank();
}
