use std::sync::Arc;

use tokio::sync::Mutex;

use crate::archive::ExtractPlan;
use crate::config::ExtractorConfig;

/// Shared state for the extractor handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ExtractorConfig>,
    /// Held for the duration of an extraction so concurrent deploy hooks
    /// cannot interleave writes into the same directory.
    pub extraction_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config: Arc::new(config),
            extraction_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn plan(&self) -> ExtractPlan {
        ExtractPlan {
            archive_path: self.config.archive_path.clone(),
            target_dir: self.config.extract_dir.clone(),
            overwrite: self.config.overwrite,
        }
    }
}
