//! Embedded schema migrations.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Runs all pending migrations and returns the applied versions.
///
/// The diesel migration harness is synchronous, so it runs on a blocking
/// thread over an [`AsyncConnectionWrapper`].
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    tracing::info!(target: TRACING_TARGET_MIGRATION, "Starting database migration process");

    let start_time = Instant::now();
    let conn = pg.get_pooled_connection().await?;
    let mut conn: AsyncConnectionWrapper<_> = conn.into();

    let results = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
        })
    })
    .await;

    let duration = start_time.elapsed();
    let results = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Migration task panicked"
        );
        PgError::Migration(err.into())
    })?;

    let versions = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Database migration process failed"
        );
        PgError::Migration(err)
    })?;

    if versions.is_empty() {
        tracing::info!(target: TRACING_TARGET_MIGRATION, "Database schema is already up to date");
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            migrations_count = versions.len(),
            versions = ?versions,
            "Database migration process completed"
        );
    }

    Ok(versions)
}
