use std::path::PathBuf;

use deployhook_core::error::CoreError;

/// Extractor configuration loaded from environment variables.
///
/// The deploy secret is deliberately absent: it lives in the env file at
/// [`ExtractorConfig::env_file`] and is re-read on every request.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Key-value file holding `DEPLOY_TOKEN` (default: `.env`).
    pub env_file: PathBuf,
    /// Archive consumed by each extraction (default: `api/vendor.zip`).
    pub archive_path: PathBuf,
    /// Directory the archive is unpacked into (default: `api/`).
    pub extract_dir: PathBuf,
    /// Overwrite files that already exist in `extract_dir` (default: `true`).
    pub overwrite: bool,
}

impl ExtractorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default          |
    /// |---------------------|------------------|
    /// | `HOST`              | `0.0.0.0`        |
    /// | `PORT`              | `3001`           |
    /// | `DEPLOY_ENV_FILE`   | `.env`           |
    /// | `ARCHIVE_PATH`      | `api/vendor.zip` |
    /// | `EXTRACT_DIR`       | `api/`           |
    /// | `EXTRACT_OVERWRITE` | `true`           |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = match lookup("PORT") {
            None => 3001,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| CoreError::Config(format!("PORT must be a valid u16, got '{raw}'")))?,
        };

        let path_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let overwrite = match lookup("EXTRACT_OVERWRITE") {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                CoreError::Config(format!("EXTRACT_OVERWRITE must be true or false, got '{raw}'"))
            })?,
        };

        Ok(Self {
            host,
            port,
            env_file: path_or("DEPLOY_ENV_FILE", ".env"),
            archive_path: path_or("ARCHIVE_PATH", "api/vendor.zip"),
            extract_dir: path_or("EXTRACT_DIR", "api/"),
            overwrite,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
