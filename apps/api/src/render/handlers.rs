use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::cv::CvRecord;
use crate::models::review::ReviewRecord;
use crate::render::{self, Artifact, CvTextFlavor};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CvExportQuery {
    #[serde(default)]
    pub flavor: CvTextFlavor,
}

impl IntoResponse for Artifact {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.kind.content_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// POST /api/v1/reviews/export/pdf
pub async fn handle_export_review_pdf(
    State(state): State<AppState>,
    Json(record): Json<ReviewRecord>,
) -> Result<Artifact, AppError> {
    let options = state.render_options();
    // Layout is CPU-bound; keep it off the async executor.
    let artifact = tokio::task::spawn_blocking(move || render::render_review_pdf(&record, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;
    Ok(artifact)
}

/// POST /api/v1/reviews/export/txt
pub async fn handle_export_review_txt(
    Json(record): Json<ReviewRecord>,
) -> Result<Artifact, AppError> {
    let artifact = tokio::task::spawn_blocking(move || render::render_review_text(&record))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in text export: {e}")))??;
    Ok(artifact)
}

/// POST /api/v1/cvs/export/txt?flavor=cv|log
pub async fn handle_export_cv_txt(
    State(state): State<AppState>,
    Query(params): Query<CvExportQuery>,
    Json(record): Json<CvRecord>,
) -> Result<Artifact, AppError> {
    let options = state.render_options();
    let artifact = tokio::task::spawn_blocking(move || {
        render::render_cv_text(&record, params.flavor, &options)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in CV export: {e}")))??;
    Ok(artifact)
}
