//! Batch history and result queries.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;

use super::models::{BatchSummary, Remark, StoredResult};

const BATCH_COLUMNS: &str = "id, started_at_ms, finished_at_ms, primary_dns, secondary_dns, mode,
     batch_size, timeout_secs, total_urls, accessible_urls, success_rate, elapsed_seconds";

/// Query batch history from the database.
///
/// Returns stored batches, most recent first. `None` returns every batch.
///
/// # Example
///
/// ```no_run
/// use reach_check::query_batch_history;
/// use sqlx::SqlitePool;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite:./reach_check.db").await?;
/// for batch in query_batch_history(&pool, Some(10)).await? {
///     println!("Batch {}: {} URLs, {}% accessible",
///              batch.batch_id, batch.total_urls, batch.success_rate);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn query_batch_history(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<BatchSummary>, DatabaseError> {
    // SQLite treats a negative LIMIT as no limit
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let query = format!(
        "SELECT {BATCH_COLUMNS} FROM batches ORDER BY started_at_ms DESC, id DESC LIMIT ?"
    );

    let rows = sqlx::query(&query).bind(limit).fetch_all(pool).await?;
    Ok(rows.iter().map(batch_from_row).collect())
}

/// Looks up one stored batch.
pub async fn query_batch(
    pool: &SqlitePool,
    batch_id: i64,
) -> Result<Option<BatchSummary>, DatabaseError> {
    let query = format!("SELECT {BATCH_COLUMNS} FROM batches WHERE id = ?");
    let row = sqlx::query(&query)
        .bind(batch_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(batch_from_row))
}

/// Returns the stored results of a batch in insertion order.
///
/// An unknown batch yields an empty vector.
///
/// # Errors
///
/// Returns `DatabaseError::SerializationError` if a stored remark is not
/// valid JSON.
pub async fn query_batch_results(
    pool: &SqlitePool,
    batch_id: i64,
) -> Result<Vec<StoredResult>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT url, http_status, remark, checked_at_ms FROM results WHERE batch_id = ? ORDER BY id",
    )
    .bind(batch_id)
    .fetch_all(pool)
    .await?;

    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        let remark: Remark = serde_json::from_str(&row.get::<String, _>("remark"))?;
        results.push(StoredResult {
            url: row.get("url"),
            http_status: u16::try_from(row.get::<i64, _>("http_status")).unwrap_or(0),
            elapsed_ms: remark.elapsed_ms,
            accessible: remark.accessible,
            error_message: remark.error,
            checked_at_ms: row.get("checked_at_ms"),
        });
    }
    Ok(results)
}

fn batch_from_row(row: &SqliteRow) -> BatchSummary {
    BatchSummary {
        batch_id: row.get("id"),
        started_at_ms: row.get("started_at_ms"),
        finished_at_ms: row.get("finished_at_ms"),
        primary_dns: row.get("primary_dns"),
        secondary_dns: row.get("secondary_dns"),
        mode: row.get("mode"),
        batch_size: row.get("batch_size"),
        timeout_secs: row.get("timeout_secs"),
        total_urls: row.get("total_urls"),
        accessible_urls: row.get("accessible_urls"),
        success_rate: row.get("success_rate"),
        elapsed_seconds: row.get("elapsed_seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::probe::ProbeResult;
    use crate::storage::insert_batch_run;
    use crate::storage::test_helpers::{create_test_pool, sample_record};

    #[tokio::test]
    async fn test_query_batch_history_most_recent_first() {
        let pool = create_test_pool().await;
        let results = vec![ProbeResult::from_response(
            "a.test",
            200,
            Duration::from_millis(3),
        )];

        let mut older = sample_record(&results);
        older.started_at_ms = 1_000;
        let mut newer = sample_record(&results);
        newer.started_at_ms = 2_000;

        let older_id = insert_batch_run(&pool, &older).await.expect("older");
        let newer_id = insert_batch_run(&pool, &newer).await.expect("newer");

        let history = query_batch_history(&pool, None).await.expect("history");
        let ids: Vec<_> = history.iter().map(|b| b.batch_id).collect();
        assert_eq!(ids, vec![newer_id, older_id]);
        assert_eq!(history[0].total_urls, 1);
        assert_eq!(history[0].success_rate, 100);

        let limited = query_batch_history(&pool, Some(1)).await.expect("limited");
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].batch_id, newer_id);
    }

    #[tokio::test]
    async fn test_query_batch_results_decodes_remark() {
        let pool = create_test_pool().await;
        let results = vec![
            ProbeResult::from_response("ok.test", 204, Duration::from_millis(7)),
            ProbeResult::transport_failure("down.test", 0, Duration::from_millis(9), "refused"),
        ];
        let batch_id = insert_batch_run(&pool, &sample_record(&results))
            .await
            .expect("insert");

        let stored = query_batch_results(&pool, batch_id).await.expect("results");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].url, "ok.test");
        assert_eq!(stored[0].http_status, 204);
        assert!(stored[0].accessible);
        assert_eq!(stored[0].elapsed_ms, 7.0);
        assert_eq!(stored[1].error_message.as_deref(), Some("refused"));
        assert!(!stored[1].accessible);
    }

    #[tokio::test]
    async fn test_query_unknown_batch() {
        let pool = create_test_pool().await;
        assert!(query_batch(&pool, 404).await.expect("query").is_none());
        assert!(query_batch_results(&pool, 404)
            .await
            .expect("query")
            .is_empty());
    }
}
