//! Handler for the archive-extract endpoint.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use deployhook_core::guard::{is_authorized, DEPLOY_TOKEN_HEADER};

use crate::archive::{extract_archive, ExtractSummary};
use crate::env_file::load_deploy_token;
use crate::error::ExtractError;
use crate::state::AppState;

/// ANY / and ANY /unzip
///
/// Responds with plain text: any informational lines followed by the
/// terminal success or failure message.
pub async fn unzip(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (mut notes, result) = run(&state, &headers).await;

    let status = match result {
        Ok(summary) => {
            tracing::info!(
                files = summary.files,
                directories = summary.directories,
                bytes = summary.bytes,
                target = %state.config.extract_dir.display(),
                "Archive extracted",
            );
            notes.push("Unzip successful!".to_string());
            StatusCode::OK
        }
        Err(err) => {
            match &err {
                ExtractError::InvalidToken => tracing::warn!("Rejected extraction request"),
                other => tracing::error!(error = ?other, "Extraction failed"),
            }
            notes.push(err.to_string());
            err.status()
        }
    };

    (status, notes.join("\n")).into_response()
}

async fn run(
    state: &AppState,
    headers: &HeaderMap,
) -> (Vec<String>, Result<ExtractSummary, ExtractError>) {
    // Re-read on every request so a rotated secret takes effect immediately.
    let configured = match load_deploy_token(&state.config.env_file) {
        Ok(token) => token,
        Err(err) => return (Vec::new(), Err(err)),
    };

    let presented = headers
        .get(DEPLOY_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !is_authorized(configured.as_ref(), presented) {
        return (Vec::new(), Err(ExtractError::InvalidToken));
    }

    // The guard travels with the blocking task, so the lock stays held until
    // the extraction ends even if this request is dropped.
    let guard = state.extraction_lock.clone().lock_owned().await;
    let plan = state.plan();
    tracing::debug!(
        archive = %plan.archive_path.display(),
        target = %plan.target_dir.display(),
        "Starting extraction",
    );

    let task = tokio::task::spawn_blocking(move || {
        let mut notes = Vec::new();
        let result = extract_archive(&plan, &mut notes);
        drop(guard);
        (notes, result)
    });

    match task.await {
        Ok(outcome) => outcome,
        Err(e) => (
            Vec::new(),
            Err(ExtractError::Extract(format!("extraction task failed: {e}"))),
        ),
    }
}
