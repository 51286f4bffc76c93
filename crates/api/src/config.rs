use std::path::PathBuf;

use deployhook_core::error::CoreError;
use deployhook_core::guard::{DeployToken, DEPLOY_TOKEN_KEY};

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared with handlers through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Postgres connection string. Required.
    pub database_url: String,
    /// Directory holding sqlx migration files (default: `./migrations`).
    pub migrations_dir: PathBuf,
    /// Deploy secret. `None` when unset or empty, which rejects every trigger.
    pub deploy_token: Option<DeployToken>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `HOST`                 | `0.0.0.0`        |
    /// | `PORT`                 | `3000`           |
    /// | `DATABASE_URL`         | required         |
    /// | `MIGRATIONS_DIR`       | `./migrations`   |
    /// | `DEPLOY_TOKEN`         | unset            |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CoreError::Config("DATABASE_URL must be set".into()))?;

        let migrations_dir = lookup("MIGRATIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./migrations"));

        let deploy_token = DeployToken::new(lookup(DEPLOY_TOKEN_KEY));

        Ok(Self {
            host,
            port,
            database_url,
            migrations_dir,
            deploy_token,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CoreError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Config(format!("{key} must be a valid number, got '{raw}'"))),
    }
}
