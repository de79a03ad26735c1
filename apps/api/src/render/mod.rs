//! Review and CV artifact rendering.
//!
//! Every entry point is synchronous, pure and owns its own layout state:
//! identical input plus an identical `generated_at` gives identical bytes.
//! Identity fields are validated before anything is drawn.

pub mod cv_txt;
pub mod handlers;
pub mod labels;
pub mod pdf_writer;
pub mod review_pdf;
pub mod review_txt;
pub mod text_dump;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::DEFAULT_BRAND_LINE;
use crate::errors::RenderError;
use crate::layout::{default_page_config, PageConfig};
use crate::models::cv::CvRecord;
use crate::models::review::{CvReference, ReviewRecord};

pub use cv_txt::CvTextFlavor;

/// Knobs of a single render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub page: PageConfig,
    /// Brand line printed in the closing footer.
    pub brand_line: String,
    /// The only input besides the record that affects the output bytes.
    pub generated_at: DateTime<Utc>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            page: default_page_config(),
            brand_line: DEFAULT_BRAND_LINE.to_string(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Text,
}

impl ArtifactKind {
    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "application/pdf",
            ArtifactKind::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Rendered bytes plus the suggested download filename.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub filename: String,
    pub bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Identity & filenames
// ────────────────────────────────────────────────────────────────────────────

/// The identity fields every review render needs, checked up front.
pub(crate) struct ReviewIdentity<'a> {
    pub cv: &'a CvReference,
    pub short_id: String,
}

pub(crate) fn review_identity(record: &ReviewRecord) -> Result<ReviewIdentity<'_>, RenderError> {
    if record.id.trim().is_empty() {
        return Err(RenderError::MalformedRecord(
            "review `_id` is missing".to_string(),
        ));
    }
    let cv = record.cv.as_ref().ok_or_else(|| {
        RenderError::MalformedRecord("review has no `cvId` reference".to_string())
    })?;
    if cv.full_name.trim().is_empty() {
        return Err(RenderError::MalformedRecord(
            "`cvId.fullName` is missing".to_string(),
        ));
    }
    Ok(ReviewIdentity {
        cv,
        short_id: labels::short_id(&record.id),
    })
}

/// `CV_Review_{Full_Name}_{LAST8}.pdf`
pub fn review_pdf_filename(full_name: &str, id: &str) -> String {
    format!(
        "CV_Review_{}_{}.pdf",
        labels::filename_name(full_name),
        labels::short_id(id)
    )
}

/// `{PREFIX}_{LAST8}.txt`
pub fn text_filename(prefix: &str, id: &str) -> String {
    format!("{prefix}_{}.txt", labels::short_id(id))
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

pub fn render_review_pdf(
    record: &ReviewRecord,
    options: &RenderOptions,
) -> Result<Artifact, RenderError> {
    let identity = review_identity(record)?;
    let document = review_pdf::layout_review(record, options)?;
    let title = format!("CV Review Report - {}", identity.cv.full_name.trim());
    let bytes = pdf_writer::write_pdf(&document, &title)?;
    let filename = review_pdf_filename(&identity.cv.full_name, &record.id);

    info!(
        review_id = %record.id,
        pages = document.page_count(),
        bytes = bytes.len(),
        filename = %filename,
        "Rendered review PDF"
    );

    Ok(Artifact {
        kind: ArtifactKind::Pdf,
        filename,
        bytes: Bytes::from(bytes),
    })
}

pub fn render_review_text(record: &ReviewRecord) -> Result<Artifact, RenderError> {
    let identity = review_identity(record)?;
    let text = review_txt::review_to_text(record, &identity);
    let filename = text_filename("REVIEW", &record.id);

    info!(
        review_id = %record.id,
        bytes = text.len(),
        filename = %filename,
        "Rendered review text"
    );

    Ok(Artifact {
        kind: ArtifactKind::Text,
        filename,
        bytes: Bytes::from(text),
    })
}

pub fn render_cv_text(
    record: &CvRecord,
    flavor: CvTextFlavor,
    options: &RenderOptions,
) -> Result<Artifact, RenderError> {
    if record.id.trim().is_empty() {
        return Err(RenderError::MalformedRecord(
            "CV `_id` is missing".to_string(),
        ));
    }
    let text = cv_txt::cv_to_text(record, flavor, options.generated_at);
    let filename = text_filename(flavor.prefix(), &record.id);

    info!(
        cv_id = %record.id,
        ?flavor,
        bytes = text.len(),
        filename = %filename,
        "Rendered CV text"
    );

    Ok(Artifact {
        kind: ArtifactKind::Text,
        filename,
        bytes: Bytes::from(text),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
