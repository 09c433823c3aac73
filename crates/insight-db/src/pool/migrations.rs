//! Schema migrations read from a directory at runtime

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    info!(
        dir = %dir.display(),
        known = migrator.iter().count(),
        "Running database migrations"
    );
    migrator.run(pool).await
}
