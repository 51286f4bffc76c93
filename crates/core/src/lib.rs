//! Shared building blocks for the deploy hook services.
//!
//! - [`guard`] -- the deploy-token authorization predicate.
//! - [`migration`] -- the migration runner capability used by the API server.
//! - [`error`] -- domain error type.

pub mod error;
pub mod guard;
pub mod migration;
