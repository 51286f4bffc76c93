use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deployhook_core::error::CoreError;
use deployhook_core::migration::MigrationError;

use crate::response::MessageResponse;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as a `{ "message": ... }` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `deployhook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The migration runner reported a failure.
    #[error("Failed to run migrations: {0}")]
    Migration(#[from] MigrationError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::Unauthorized(reason)) => {
                tracing::warn!(reason = %reason, "Rejected deploy request");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Core(CoreError::Config(msg)) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Migration(err) => {
                tracing::error!(error = %err, "Migration run failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, axum::Json(MessageResponse::new(message))).into_response()
    }
}
