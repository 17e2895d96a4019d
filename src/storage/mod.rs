//! Database storage.
//!
//! This module provides:
//! - Connection pool setup and migrations
//! - Insertion of finished batches with their per-URL results
//! - Batch history and per-batch result queries

mod insert;
mod migrations;
mod models;
mod pool;
mod query;
#[cfg(test)]
pub mod test_helpers;

// Re-export public API
pub use insert::insert_batch_run;
pub use migrations::run_migrations;
pub use models::{BatchRunRecord, BatchSummary, Remark, StoredResult};
pub use pool::init_db_pool_with_path;
pub use query::{query_batch, query_batch_history, query_batch_results};
