//! `deployhook-extractor` library crate.
//!
//! Unpacks an uploaded `vendor.zip` into the backend's dependency directory
//! when the request carries the deploy token. The binary entrypoint lives in
//! `main.rs`; everything else is exposed here for integration tests.

pub mod archive;
pub mod config;
pub mod env_file;
pub mod error;
pub mod handler;
pub mod router;
pub mod state;
