//! Shared sample records for unit tests.

use crate::models::cv::{CvRecord, PreviousExperience};
use crate::models::review::{
    CvReference, Example, GlobalSummary, ReviewMeta, ReviewRecord, RewrittenCv,
    RewrittenSection, SectionReview, SectionScore, SectionStatus,
};

pub const SAMPLE_REVIEW_ID: &str = "60f1a2b3c4d5e6f7a8b9c0d1";

pub fn make_section(name: &str, status: SectionStatus, score: f64) -> SectionReview {
    SectionReview {
        name: name.to_string(),
        status,
        score,
        justification: format!("{name} is solid but could show more measurable outcomes."),
        strengths: vec![format!("Clear structure in {name}")],
        weaknesses: vec!["Few quantified outcomes".to_string()],
        actionable_edits: vec!["Add numbers to each achievement".to_string()],
        examples: vec![Example {
            bad: "Did audits.".to_string(),
            better: "Led a two-cycle sepsis audit that raised compliance from 54% to 88%.".to_string(),
            why_better: "Names the scope, the role and the measured result.".to_string(),
        }],
        missing_content: vec!["Dates for each post".to_string()],
    }
}

/// A record with every optional part populated.
pub fn make_full_review() -> ReviewRecord {
    ReviewRecord {
        id: SAMPLE_REVIEW_ID.to_string(),
        cv: Some(CvReference {
            id: "cv-0001".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            full_name: "Jane Doe".to_string(),
            applying_for_job_role: "middleGrade".to_string(),
            target_markets: vec!["uk".to_string(), "republicOfIreland".to_string()],
            service_level: "premium".to_string(),
            status: "reviewed".to_string(),
            created_at: Some("2024-02-01T09:00:00.000Z".to_string()),
        }),
        review_type: "premium".to_string(),
        sections: vec![
            make_section("Personal Statement", SectionStatus::Ok, 3.0),
            make_section("Clinical Skills", SectionStatus::Warning, 2.0),
        ],
        global_summary: GlobalSummary {
            overall_readiness: "Nearly ready".to_string(),
            priority_fixes: vec![
                "Quantify audit outcomes".to_string(),
                "Tighten the personal statement".to_string(),
                "List procedures with numbers".to_string(),
            ],
            questions: vec!["Which deanery are you targeting?".to_string()],
            scoring_breakdown: vec![
                SectionScore {
                    section_name: "Personal Statement".to_string(),
                    score: 3.0,
                },
                SectionScore {
                    section_name: "Clinical Skills".to_string(),
                    score: 2.0,
                },
            ],
            total_score: 5.0,
        },
        rewritten_cv: Some(RewrittenCv {
            sections: vec![RewrittenSection {
                section_name: "Personal Statement".to_string(),
                content: "I am a registrar-level clinician with five years of acute medicine experience."
                    .to_string(),
            }],
        }),
        meta: Some(ReviewMeta {
            version: "v2".to_string(),
            notes: "Prioritise NHS-style formatting before applying to UK posts.".to_string(),
            review_date: "2024-03-05".to_string(),
        }),
        completed_at: Some("2024-03-05T14:30:00.000Z".to_string()),
    }
}

pub fn make_cv() -> CvRecord {
    CvRecord {
        id: "64b7c8d9e0f1a2b3c4d5e6f7".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        full_name: "Jane Doe".to_string(),
        email: Some("jane@example.com".to_string()),
        year_of_birth: Some(1990),
        year_of_medical_graduation: Some(2014),
        applying_for_job_role: "tier1".to_string(),
        target_markets: vec!["uk".to_string(), "gcc".to_string()],
        previous_experiences: vec![PreviousExperience {
            start_date: "2020-08-05".to_string(),
            end_date: "2022-08-01".to_string(),
            hospital_name: "St Elsewhere".to_string(),
            hospital_address: "1 High Street, Leeds".to_string(),
            job_title: "Core Trainee".to_string(),
            job_description: "Acute medical take and ward cover.".to_string(),
        }],
        research_experience: "Two posters at regional meetings.".to_string(),
        teaching_experience: "Weekly bedside teaching for students.".to_string(),
        teamwork_and_communication: "MDT lead for discharge planning.".to_string(),
        leadership_and_management: "Rota coordinator for 12 juniors.".to_string(),
        publications_and_presentations: "One case report.".to_string(),
        quality_improvement_and_audit: "Sepsis audit, two cycles.".to_string(),
        clinical_skills_and_procedures: "Central lines, chest drains.".to_string(),
        others: "Fluent in Arabic.".to_string(),
        personal_statement: "Committed to acute medicine.".to_string(),
        supporting_statement: Some("Seeking a registrar post.".to_string()),
        service_level: "premium".to_string(),
        status: "pending".to_string(),
        created_at: "2024-01-15T08:00:00.000Z".to_string(),
        ..Default::default()
    }
}
