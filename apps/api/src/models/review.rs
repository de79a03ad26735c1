//! Review feedback records as served by the review-retrieval API.
//!
//! Field names follow the upstream JSON (`_id`, `cvId`, snake_case review fields).
//! Everything except identity is defaulted so a sparse record still renders a
//! reduced document instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Upper bound of a single section score.
pub const MAX_SECTION_SCORE: f64 = 4.0;

/// Missing-content sentinel the reviewer tooling writes for blank CV sections.
pub const EMPTY_SECTION_SENTINEL: &str = "Empty section";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "cvId", default)]
    pub cv: Option<CvReference>,
    #[serde(default)]
    pub review_type: String,
    #[serde(default)]
    pub sections: Vec<SectionReview>,
    #[serde(default)]
    pub global_summary: GlobalSummary,
    #[serde(default)]
    pub rewritten_cv: Option<RewrittenCv>,
    #[serde(default)]
    pub meta: Option<ReviewMeta>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl ReviewRecord {
    /// Maximum attainable total: every section scored at [`MAX_SECTION_SCORE`].
    pub fn max_total_score(&self) -> f64 {
        self.sections.len() as f64 * MAX_SECTION_SCORE
    }

    /// Rewritten sections, empty when the record carries none.
    pub fn rewritten_sections(&self) -> &[RewrittenSection] {
        self.rewritten_cv
            .as_ref()
            .map(|cv| cv.sections.as_slice())
            .unwrap_or_default()
    }
}

/// The subset of the reviewed CV that review documents print.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvReference {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub applying_for_job_role: String,
    #[serde(default)]
    pub target_markets: Vec<String>,
    #[serde(default)]
    pub service_level: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionReview {
    #[serde(rename = "section_name", default)]
    pub name: String,
    #[serde(rename = "section_status", default)]
    pub status: SectionStatus,
    #[serde(rename = "section_score", default)]
    pub score: f64,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub actionable_edits: Vec<String>,
    #[serde(rename = "examples_bad_to_better", default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub missing_content: Vec<String>,
}

impl SectionReview {
    /// Non-blank missing-content entries. A list whose only entry is the
    /// empty-section sentinel comes back empty; otherwise the sentinel is kept.
    pub fn reportable_missing_content(&self) -> Vec<&str> {
        let entries: Vec<&str> = self
            .missing_content
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect();
        if entries == [EMPTY_SECTION_SENTINEL] {
            return Vec::new();
        }
        entries
    }
}

/// A before/after rewrite suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub bad: String,
    #[serde(default)]
    pub better: String,
    #[serde(default)]
    pub why_better: String,
}

/// Reviewer verdict on a section. Unknown values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionStatus {
    Ok,
    Good,
    Missing,
    NeedsWork,
    Warning,
    Other(String),
}

impl SectionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SectionStatus::Ok => "ok",
            SectionStatus::Good => "good",
            SectionStatus::Missing => "missing",
            SectionStatus::NeedsWork => "needs work",
            SectionStatus::Warning => "warning",
            SectionStatus::Other(raw) => raw,
        }
    }
}

impl Default for SectionStatus {
    fn default() -> Self {
        SectionStatus::Other(String::new())
    }
}

impl From<String> for SectionStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "ok" => SectionStatus::Ok,
            "good" => SectionStatus::Good,
            "missing" => SectionStatus::Missing,
            "needs work" => SectionStatus::NeedsWork,
            "warning" => SectionStatus::Warning,
            _ => SectionStatus::Other(raw),
        }
    }
}

impl From<SectionStatus> for String {
    fn from(status: SectionStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSummary {
    #[serde(default)]
    pub overall_readiness: String,
    #[serde(rename = "top_fixes", default)]
    pub priority_fixes: Vec<String>,
    #[serde(rename = "questions_for_user", default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub scoring_breakdown: Vec<SectionScore>,
    #[serde(default)]
    pub total_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionScore {
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewrittenCv {
    #[serde(default)]
    pub sections: Vec<RewrittenSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewrittenSection {
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewMeta {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub review_date: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_upstream_field_names() {
        let record: ReviewRecord = serde_json::from_value(json!({
            "_id": "60f1a2b3c4d5e6f7a8b9c0d1",
            "id": "60f1a2b3c4d5e6f7a8b9c0d1",
            "cvId": { "_id": "cv1", "fullName": "Jane Doe", "targetMarkets": ["uk"] },
            "review_type": "premium",
            "sections": [{
                "section_name": "Personal Statement",
                "section_status": "Needs Work",
                "section_score": 2,
                "justification": "Too generic.",
                "examples_bad_to_better": [{ "bad": "a", "better": "b", "why_better": "c" }]
            }],
            "global_summary": { "top_fixes": ["Fix it"], "questions_for_user": ["Why?"], "total_score": 2 }
        }))
        .unwrap();

        assert_eq!(record.id, "60f1a2b3c4d5e6f7a8b9c0d1");
        assert_eq!(record.cv.as_ref().unwrap().full_name, "Jane Doe");
        assert_eq!(record.sections[0].status, SectionStatus::NeedsWork);
        assert_eq!(record.sections[0].examples.len(), 1);
        assert_eq!(record.global_summary.priority_fixes, vec!["Fix it"]);
        assert!(record.rewritten_cv.is_none());
        assert!(record.meta.is_none());
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let status = SectionStatus::from("Borderline".to_string());
        assert_eq!(status, SectionStatus::Other("Borderline".to_string()));
        assert_eq!(status.as_str(), "Borderline");
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(SectionStatus::from(" OK ".to_string()), SectionStatus::Ok);
        assert_eq!(SectionStatus::from("Good".to_string()), SectionStatus::Good);
    }

    #[test]
    fn test_max_total_score_scales_with_sections() {
        let record = ReviewRecord {
            sections: vec![SectionReview::default(), SectionReview::default()],
            ..Default::default()
        };
        assert_eq!(record.max_total_score(), 8.0);
    }

    #[test]
    fn test_missing_content_sentinel_alone_is_suppressed() {
        let section = SectionReview {
            missing_content: vec![EMPTY_SECTION_SENTINEL.to_string()],
            ..Default::default()
        };
        assert!(section.reportable_missing_content().is_empty());
    }

    #[test]
    fn test_sentinel_among_other_entries_is_kept() {
        let section = SectionReview {
            missing_content: vec![
                EMPTY_SECTION_SENTINEL.to_string(),
                "Audit cycle".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            section.reportable_missing_content(),
            vec![EMPTY_SECTION_SENTINEL, "Audit cycle"]
        );
    }

    #[test]
    fn test_missing_content_keeps_real_entries() {
        let section = SectionReview {
            missing_content: vec!["Audit cycle".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert_eq!(section.reportable_missing_content(), vec!["Audit cycle"]);
    }
}
