//! Handler for the migration trigger endpoint.

use axum::extract::State;
use axum::Json;
use deployhook_core::migration::MigrationError;

use crate::error::AppResult;
use crate::middleware::deploy_token::DeployAuthorized;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /run-migrations
///
/// Applies every pending migration without prompting. Runner failures come
/// back as `AppError::Migration` and render as a 500 carrying the detail.
///
/// The run happens on its own task, so a caller hanging up does not stop a
/// migration halfway through.
pub async fn run_migrations(
    State(state): State<AppState>,
    _auth: DeployAuthorized,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!("Deploy token accepted, running migrations");

    let runner = state.migration_runner.clone();
    let report = tokio::spawn(async move { runner.run().await })
        .await
        .map_err(|e| MigrationError::Migrate(format!("migration task failed: {e}")))??;
    tracing::info!(applied = report.applied, "Migrations complete");

    Ok(Json(MessageResponse::new("Migrations run successfully")))
}
