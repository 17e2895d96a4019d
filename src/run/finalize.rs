//! Persisting a finished check.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use sqlx::SqlitePool;
use std::path::Path;

use crate::storage::{init_db_pool_with_path, insert_batch_run, run_migrations, BatchRunRecord};

use super::engine::CheckReport;

impl<'a> From<&'a CheckReport> for BatchRunRecord<'a> {
    fn from(report: &'a CheckReport) -> Self {
        BatchRunRecord {
            started_at_ms: report.started_at_ms,
            finished_at_ms: report.finished_at_ms,
            primary_dns: report.dns.primary.as_deref(),
            secondary_dns: report.dns.secondary.as_deref(),
            mode: report.mode.as_str(),
            batch_size: report.batch_size,
            timeout_secs: report.timeout_secs,
            success_rate: report.success_rate,
            elapsed_seconds: report.elapsed_seconds,
            results: &report.results,
        }
    }
}

/// Stores `report` in an already migrated database and returns the batch id.
pub async fn save_report(pool: &SqlitePool, report: &CheckReport) -> Result<i64> {
    let batch_id = insert_batch_run(pool, &BatchRunRecord::from(report))
        .await
        .context("Failed to store batch results")?;
    info!("Stored batch {} ({} results)", batch_id, report.results.len());
    Ok(batch_id)
}

/// Opens (creating and migrating if needed) the database at `db_path`,
/// stores `report` and closes the pool.
pub async fn persist_report(db_path: &Path, report: &CheckReport) -> Result<i64> {
    let pool = init_db_pool_with_path(db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let batch_id = save_report(&pool, report).await?;

    // Checkpoint WAL file for clean database state
    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool.as_ref())
        .await
    {
        warn!(
            "Failed to checkpoint WAL file (this is non-critical): {}",
            e
        );
    }

    pool.close().await;
    debug!("Database pool closed");
    Ok(batch_id)
}
