//! Route definitions for the migration trigger.

use axum::routing::get;
use axum::Router;

use crate::handlers::migrations;
use crate::state::AppState;

/// ```text
/// GET /run-migrations    -> run_migrations (deploy token required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/run-migrations", get(migrations::run_migrations))
}
