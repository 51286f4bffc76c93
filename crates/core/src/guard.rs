//! Deploy-token guard.
//!
//! Both deploy endpoints accept a request only when the `X-DEPLOY-TOKEN`
//! header carries exactly the configured secret. The comparison runs over
//! SHA-256 digests with [`subtle::ConstantTimeEq`], so neither the secret's
//! content nor its length is observable through response timing.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::CoreError;

/// Request header carrying the caller's deploy token.
///
/// Header names are case-insensitive, so this matches `X-DEPLOY-TOKEN`.
pub const DEPLOY_TOKEN_HEADER: &str = "x-deploy-token";

/// Configuration key holding the deploy secret (env var or env-file entry).
pub const DEPLOY_TOKEN_KEY: &str = "DEPLOY_TOKEN";

/// The configured deploy secret.
///
/// Always non-empty: an empty configured value is treated as a
/// misconfiguration and never yields a `DeployToken`.
#[derive(Clone)]
pub struct DeployToken(String);

impl DeployToken {
    /// Wrap a configured value. Returns `None` for an absent or empty value.
    pub fn new(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self)
    }

    /// Constant-time check of a caller-presented token against this secret.
    pub fn verify(&self, presented: &str) -> bool {
        let expected = Sha256::digest(self.0.as_bytes());
        let actual = Sha256::digest(presented.as_bytes());
        bool::from(expected.as_slice().ct_eq(actual.as_slice()))
    }
}

impl fmt::Debug for DeployToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeployToken([REDACTED])")
    }
}

/// Decide whether a request is authorized.
///
/// Authorized iff a secret is configured and the header value is present
/// and byte-for-byte equal to it. No normalization is applied.
pub fn is_authorized(configured: Option<&DeployToken>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (Some(secret), Some(value)) => secret.verify(value),
        _ => false,
    }
}

/// [`is_authorized`] as a `Result`, for callers that propagate with `?`.
pub fn authorize(
    configured: Option<&DeployToken>,
    presented: Option<&str>,
) -> Result<(), CoreError> {
    if configured.is_none() {
        return Err(CoreError::Unauthorized("no deploy token configured".into()));
    }
    if presented.is_none() {
        return Err(CoreError::Unauthorized("missing deploy token header".into()));
    }
    if is_authorized(configured, presented) {
        Ok(())
    } else {
        Err(CoreError::Unauthorized("deploy token mismatch".into()))
    }
}
