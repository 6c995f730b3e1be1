//! Schema migrations, applied at startup

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the SQL migrations shipped with this crate
pub fn bundled_migrations_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations"))
}

/// Apply pending migrations from `dir`, or from the bundled set when `None`
pub async fn run_migrations(pool: &PgPool, dir: Option<&Path>) -> Result<(), MigrateError> {
    let dir = dir.map_or_else(bundled_migrations_dir, Path::to_path_buf);
    let migrator = Migrator::new(dir.as_path()).await?;
    migrator.run(pool).await?;

    info!(path = %dir.display(), "Database migrations applied");
    Ok(())
}
