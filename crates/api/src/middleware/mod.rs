//! Request extractors guarding the deploy endpoints.
//!
//! - [`deploy_token::DeployAuthorized`] -- requires a valid `X-DEPLOY-TOKEN` header.

pub mod deploy_token;
