use std::sync::Arc;

use deployhook_core::guard::DeployToken;
use deployhook_core::migration::MigrationRunner;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Configured deploy secret, injected at startup.
    pub deploy_token: Option<DeployToken>,
    /// Applies pending schema migrations.
    pub migration_runner: Arc<dyn MigrationRunner>,
}
