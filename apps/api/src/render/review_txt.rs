//! Flat text rendition of a review, block for block in report order.

use crate::layout::palette::{score_ratio, score_tier};
use crate::models::review::{ReviewRecord, MAX_SECTION_SCORE};
use crate::render::labels::{
    capitalize, format_score, job_role_display, long_date, markets_display,
};
use crate::render::text_dump::TextDump;
use crate::render::ReviewIdentity;

pub(crate) fn review_to_text(record: &ReviewRecord, identity: &ReviewIdentity<'_>) -> String {
    let cv = identity.cv;
    let summary = &record.global_summary;
    let max_total = record.max_total_score();
    let mut out = TextDump::new();

    out.line("CV REVIEW REPORT");
    out.line(format!("Review ID = {}", record.id.trim()));
    out.blank();

    out.block("CANDIDATE");
    out.field("Name", cv.full_name.trim());
    out.field("Applying for", job_role_display(&cv.applying_for_job_role));
    out.field("Target Markets", &markets_display(&cv.target_markets));
    out.field("Service Level", &capitalize(&record.review_type));
    out.field(
        "Review Date",
        &record.completed_at.as_deref().map(long_date).unwrap_or_default(),
    );
    out.blank();

    out.block("EXECUTIVE SUMMARY");
    out.field("Overall Readiness", &summary.overall_readiness);
    let percent = (score_ratio(summary.total_score, max_total) * 100.0).round() as i64;
    out.line(format!(
        "Total Score: {}/{} ({percent}%)",
        format_score(summary.total_score),
        format_score(max_total)
    ));
    out.blank();
    out.numbered(Some("Priority Action Items"), &summary.priority_fixes);
    let overview: Vec<String> = summary
        .scoring_breakdown
        .iter()
        .filter(|s| !s.section_name.trim().is_empty())
        .map(|s| {
            format!(
                "{} - {} ({}/{})",
                s.section_name.trim(),
                score_tier(score_ratio(s.score, MAX_SECTION_SCORE)).label(),
                format_score(s.score),
                format_score(MAX_SECTION_SCORE)
            )
        })
        .collect();
    out.list("Section Performance Overview", &overview);

    for (i, section) in record.sections.iter().enumerate() {
        out.block(&format!("SECTION {}: {}", i + 1, section.name.trim()));
        out.field("Status", section.status.as_str());
        out.line(format!(
            "Score: {}/{} ({})",
            format_score(section.score),
            format_score(MAX_SECTION_SCORE),
            score_tier(score_ratio(section.score, MAX_SECTION_SCORE)).label()
        ));
        out.blank();
        out.labelled_text("Justification", &section.justification);
        out.list("Strengths", &section.strengths);
        out.list("Areas for Improvement", &section.weaknesses);
        out.list("Actionable Recommendations", &section.actionable_edits);

        for (j, example) in section.examples.iter().enumerate() {
            if example.bad.trim().is_empty()
                && example.better.trim().is_empty()
                && example.why_better.trim().is_empty()
            {
                continue;
            }
            out.line(format!("Example {}:", j + 1));
            out.field("Before", &example.bad);
            out.field("After", &example.better);
            out.field("Why Better", &example.why_better);
            out.blank();
        }

        out.list("Missing Elements", &section.reportable_missing_content());
    }

    out.block("CLARIFICATION QUESTIONS");
    out.numbered(None, &summary.questions);

    for section in record.rewritten_sections() {
        if section.section_name.trim().is_empty() && section.content.trim().is_empty() {
            continue;
        }
        out.block(&format!("REWRITTEN CV: {}", section.section_name.trim()));
        out.text(&section.content);
        out.blank();
    }

    if let Some(meta) = &record.meta {
        out.block("STRATEGIC RECOMMENDATIONS");
        out.text(&meta.notes);
        out.blank();
        out.field("Version", &meta.version);
        out.field("Review Date", &long_date(&meta.review_date));
    }

    out.finish()
}
