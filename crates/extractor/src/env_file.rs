//! Per-request loading of the deploy secret from a key-value env file.
//!
//! The file is parsed with `dotenvy` without touching the process
//! environment, so each request sees the file's current contents.
//!
//! `dotenvy` expands `$NAME` in unquoted and double-quoted values. A secret
//! containing `$` must be single-quoted (`DEPLOY_TOKEN='pa$word'`) to be read
//! literally.

use std::io::ErrorKind;
use std::path::Path;

use deployhook_core::guard::{DeployToken, DEPLOY_TOKEN_KEY};

use crate::error::ExtractError;

/// Read `DEPLOY_TOKEN` from the env file at `path`.
///
/// A missing file is [`ExtractError::ConfigMissing`]. A file without a
/// usable (non-empty) `DEPLOY_TOKEN` yields `Ok(None)`, which the guard
/// always rejects.
pub fn load_deploy_token(path: &Path) -> Result<Option<DeployToken>, ExtractError> {
    let entries = dotenvy::from_path_iter(path).map_err(|e| match e {
        dotenvy::Error::Io(ref io) if io.kind() == ErrorKind::NotFound => {
            ExtractError::ConfigMissing
        }
        other => ExtractError::ConfigUnreadable(other),
    })?;

    let mut token = None;
    for entry in entries {
        let (key, value) = entry.map_err(ExtractError::ConfigUnreadable)?;
        if key == DEPLOY_TOKEN_KEY {
            token = Some(value);
        }
    }

    Ok(DeployToken::new(token))
}
