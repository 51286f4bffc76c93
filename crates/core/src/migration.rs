//! Migration runner capability.
//!
//! Defines [`MigrationRunner`], implemented by the sqlx-backed runner in
//! `deployhook-db` and by stubs in tests, along with [`MigrationReport`] and
//! [`MigrationError`].

use async_trait::async_trait;

/// Summary of a completed migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationReport {
    /// Number of migrations newly applied by this run (0 when up to date).
    pub applied: usize,
}

/// Errors raised while applying migrations.
///
/// The display text is what callers see after `Failed to run migrations: `.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Migration files could not be located or parsed.
    #[error("could not load migrations: {0}")]
    Source(String),

    /// The database could not be reached or a bookkeeping query failed.
    #[error("database error: {0}")]
    Database(String),

    /// A migration failed to apply.
    #[error("{0}")]
    Migrate(String),
}

/// Applies all pending schema migrations, non-interactively.
///
/// Implementations must be idempotent: migrations that are already applied
/// are skipped, so an up-to-date schema yields `applied == 0`.
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    async fn run(&self) -> Result<MigrationReport, MigrationError>;
}
