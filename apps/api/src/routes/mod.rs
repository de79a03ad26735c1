pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::render::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Review exports
        .route(
            "/api/v1/reviews/export/pdf",
            post(handlers::handle_export_review_pdf),
        )
        .route(
            "/api/v1/reviews/export/txt",
            post(handlers::handle_export_review_txt),
        )
        // CV exports
        .route("/api/v1/cvs/export/txt", post(handlers::handle_export_cv_txt))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::default_page_config;
    use crate::models::fixtures::{make_cv, make_full_review};

    fn make_app() -> Router {
        build_router(AppState {
            config: Config::default(),
            page_config: default_page_config(),
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = make_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["service"], "reviewdoc");
    }

    #[tokio::test]
    async fn test_review_pdf_export() {
        let record = serde_json::to_value(make_full_review()).unwrap();
        let response = make_app()
            .oneshot(post_json("/api/v1/reviews/export/pdf", &record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"CV_Review_Jane_Doe_A8B9C0D1.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_review_text_export() {
        let record = serde_json::to_value(make_full_review()).unwrap();
        let response = make_app()
            .oneshot(post_json("/api/v1/reviews/export/txt", &record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"REVIEW_A8B9C0D1.txt\""
        );
    }

    #[tokio::test]
    async fn test_cv_log_export_uses_flavor_query() {
        let record = serde_json::to_value(make_cv()).unwrap();
        let response = make_app()
            .oneshot(post_json("/api/v1/cvs/export/txt?flavor=log", &record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"LOG_C4D5E6F7.txt\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("SUBMISSION DETAILS"));
    }

    #[tokio::test]
    async fn test_missing_identity_is_422() {
        let response = make_app()
            .oneshot(post_json(
                "/api/v1/reviews/export/pdf",
                &json!({ "_id": "60f1a2b3c4d5e6f7a8b9c0d1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "MALFORMED_RECORD");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = make_app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
