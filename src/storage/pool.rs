//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled for concurrent access
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{debug, error};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::DatabaseError;

/// Initializes and returns a database connection pool with an explicit path.
///
/// Creates the database file if it doesn't exist and enables WAL mode
/// for better concurrent access.
///
/// # Errors
///
/// Returns `DatabaseError::FileCreationError` if the file cannot be created and
/// `DatabaseError::SqlError` if the connection or pragma fails.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => debug!("Database file created: {db_path_str}"),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Database file already exists: {db_path_str}")
        }
        Err(e) => {
            error!("Failed to create database file {db_path_str}: {e}");
            return Err(DatabaseError::FileCreationError(format!("{db_path_str}: {e}")));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    // Enable WAL mode
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_db_pool_creates_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("probe.db");
        assert!(!path.exists());

        let pool = init_db_pool_with_path(&path).await.expect("pool");
        assert!(path.exists());
        pool.close().await;

        // Reopening an existing file is fine
        let pool = init_db_pool_with_path(&path).await.expect("reopen");
        pool.close().await;
    }

    #[tokio::test]
    async fn test_init_db_pool_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("probe.db");
        let result = init_db_pool_with_path(&path).await;
        assert!(matches!(result, Err(DatabaseError::FileCreationError(_))));
    }
}
