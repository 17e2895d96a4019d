// Shared test helpers for database setup and input files.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;

use reach_check::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Writes `lines` to `urls.txt` inside `dir` and returns its path.
#[allow(dead_code)] // Used by other test files
pub fn write_url_file(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("urls.txt");
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("Failed to write URL file");
    path
}
