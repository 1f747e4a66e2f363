//! Embedded schema migrations.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies pending migrations on a dedicated blocking connection.
///
/// ## Errors
/// Returns `DbError::MigrationError` if connecting or migrating fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_migrations(database_url: &str) -> DbResult<()> {
    let url = database_url.to_string();

    let applied = tokio::task::spawn_blocking(move || -> DbResult<usize> {
        let mut conn = PgConnection::establish(&url)
            .map_err(|e| DbError::MigrationError(format!("failed to connect: {e}")))?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::MigrationError(format!("failed to run migrations: {e}")))?;
        Ok(versions.len())
    })
    .await
    .map_err(|e| DbError::MigrationError(format!("migration task panicked: {e}")))??;

    tracing::info!(applied, "Database migrations up to date");
    Ok(())
}
