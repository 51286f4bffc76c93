//! sqlx-backed [`MigrationRunner`].
//!
//! Migrations are resolved from a directory at run time, so a deploy can ship
//! new migration files without rebuilding this service. `Migrator::run` holds
//! a Postgres advisory lock while applying, which serializes concurrent
//! triggers inside the database.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::migrate::{Migrate, MigrateError, Migrator};

use deployhook_core::migration::{MigrationError, MigrationReport, MigrationRunner};

use crate::DbPool;

/// Applies the migrations found in `migrations_dir` to `pool`.
#[derive(Debug, Clone)]
pub struct SqlxMigrationRunner {
    pool: DbPool,
    migrations_dir: PathBuf,
}

impl SqlxMigrationRunner {
    pub fn new(pool: DbPool, migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            migrations_dir: migrations_dir.into(),
        }
    }

    /// Number of migrations recorded in `_sqlx_migrations`.
    async fn applied_count(&self) -> Result<usize, MigrationError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| MigrationError::Database(e.to_string()))?;
        conn.ensure_migrations_table().await.map_err(classify)?;
        let applied = conn.list_applied_migrations().await.map_err(classify)?;
        Ok(applied.len())
    }
}

#[async_trait]
impl MigrationRunner for SqlxMigrationRunner {
    async fn run(&self) -> Result<MigrationReport, MigrationError> {
        let migrator = Migrator::new(self.migrations_dir.clone())
            .await
            .map_err(classify)?;
        tracing::debug!(
            dir = %self.migrations_dir.display(),
            known = migrator.iter().count(),
            "Resolved migrations",
        );

        let before = self.applied_count().await?;
        migrator.run(&self.pool).await.map_err(classify)?;
        let after = self.applied_count().await?;

        Ok(MigrationReport {
            applied: after.saturating_sub(before),
        })
    }
}

fn classify(err: MigrateError) -> MigrationError {
    match err {
        MigrateError::Source(e) => MigrationError::Source(e.to_string()),
        MigrateError::Execute(e) => MigrationError::Database(e.to_string()),
        other => MigrationError::Migrate(other.to_string()),
    }
}
