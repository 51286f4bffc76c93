//! Deploy-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use deployhook_core::guard::{authorize, DEPLOY_TOKEN_HEADER};

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured deploy token.
///
/// Add it as a handler parameter; the handler body only runs once the guard
/// has accepted the `X-DEPLOY-TOKEN` header. Rejection is a 401 with body
/// `{"message":"Unauthorized"}`.
#[derive(Debug, Clone, Copy)]
pub struct DeployAuthorized;

impl FromRequestParts<AppState> for DeployAuthorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A non-UTF-8 header value is treated the same as a missing one.
        let presented = parts
            .headers
            .get(DEPLOY_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        authorize(state.deploy_token.as_ref(), presented)?;
        Ok(DeployAuthorized)
    }
}
