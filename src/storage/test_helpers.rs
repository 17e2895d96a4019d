//! Shared test helpers for storage module tests.

#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::probe::ProbeResult;
#[cfg(test)]
use crate::storage::{run_migrations, BatchRunRecord};

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds a standard-mode record over `results` with fixed metadata.
#[cfg(test)]
pub fn sample_record(results: &[ProbeResult]) -> BatchRunRecord<'_> {
    BatchRunRecord {
        started_at_ms: 1704067200000,
        finished_at_ms: 1704067201000,
        primary_dns: Some("10.0.0.53"),
        secondary_dns: None,
        mode: "standard",
        batch_size: 100,
        timeout_secs: 30,
        success_rate: crate::summary::success_rate(results),
        elapsed_seconds: 1.0,
        results,
    }
}
