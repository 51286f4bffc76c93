//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router is involved.

use axum::response::IntoResponse;
use deployhook_api::error::AppError;
use deployhook_core::error::CoreError;
use deployhook_core::migration::MigrationError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn unauthorized_hides_reason() {
    let err = AppError::Core(CoreError::Unauthorized("deploy token mismatch".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json, serde_json::json!({ "message": "Unauthorized" }));
}

#[tokio::test]
async fn migration_failure_carries_detail() {
    let err = AppError::from(MigrationError::Database("connection refused".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["message"],
        "Failed to run migrations: database error: connection refused"
    );
}

#[tokio::test]
async fn config_error_is_sanitized() {
    let err = AppError::Core(CoreError::Config(
        "DATABASE_URL secret connection string".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("secret"));
    assert_eq!(json["message"], "An internal error occurred");
}
