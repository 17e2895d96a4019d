//! Batch insertion.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;

use super::models::{BatchRunRecord, Remark};

/// Stores a finished batch and one result row per URL.
///
/// Everything is written in one transaction: either the whole batch is
/// stored or nothing is. Each result's `checked_at_ms` is the batch's finish
/// time.
///
/// # Returns
///
/// The identifier of the new `batches` row.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` on any SQL failure and
/// `DatabaseError::SerializationError` if a remark cannot be encoded.
pub async fn insert_batch_run(
    pool: &SqlitePool,
    record: &BatchRunRecord<'_>,
) -> Result<i64, DatabaseError> {
    let accessible = record.results.iter().filter(|r| r.accessible).count();

    let mut tx = pool.begin().await?;

    let batch_id: i64 = sqlx::query(
        "INSERT INTO batches (
            started_at_ms, finished_at_ms, primary_dns, secondary_dns, mode, batch_size,
            timeout_secs, total_urls, accessible_urls, success_rate, elapsed_seconds
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(record.started_at_ms)
    .bind(record.finished_at_ms)
    .bind(record.primary_dns)
    .bind(record.secondary_dns)
    .bind(record.mode)
    .bind(record.batch_size as i64)
    .bind(record.timeout_secs as i64)
    .bind(record.results.len() as i64)
    .bind(accessible as i64)
    .bind(i64::from(record.success_rate))
    .bind(record.elapsed_seconds)
    .fetch_one(&mut *tx)
    .await?
    .get("id");

    for result in record.results {
        let remark = serde_json::to_string(&Remark::from(result))?;
        sqlx::query(
            "INSERT INTO results (batch_id, url, http_status, remark, checked_at_ms)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(batch_id)
        .bind(&result.url)
        .bind(i64::from(result.http_status))
        .bind(remark)
        .bind(record.finished_at_ms)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    log::debug!(
        "Stored batch {batch_id} with {} results",
        record.results.len()
    );
    Ok(batch_id)
}
