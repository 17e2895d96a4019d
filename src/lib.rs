//! reach_check library: batched URL reachability checks
//!
//! This library probes lists of URLs with one header-only HTTP request each,
//! schedules the probes in size-tiered batches with bounded concurrency, and
//! reports which URLs are accessible. Finished batches can be stored in a
//! SQLite database and reviewed later.
//!
//! # Example
//!
//! ```no_run
//! use reach_check::{check_urls, CheckRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = CheckRequest {
//!     primary_dns: Some("1.1.1.1".to_string()),
//!     timeout_secs: Some(10),
//!     ..CheckRequest::new(vec!["example.com".to_string(), "http://example.org".to_string()])
//! };
//!
//! let report = check_urls(request).await?;
//! for result in &report.results {
//!     println!("{} -> {} ({})", result.url, result.http_status, result.accessible);
//! }
//! println!("{}% accessible", report.success_rate);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod coordinator;
pub mod dns;
mod error_handling;
pub mod initialization;
pub mod planner;
pub mod probe;
mod run;
pub mod storage;
pub mod summary;

// Re-export public API
pub use config::{Config, FailOn, LogFormat, LogLevel};
pub use coordinator::{Coordinator, Progress, RunMode};
pub use dns::DnsConfig;
pub use error_handling::{
    ConfigError, DatabaseError, ErrorType, InitializationError, ProcessingStats,
};
pub use probe::{HttpProber, ProbeRequest, ProbeResult, Prober};
pub use run::{
    check_urls, check_urls_with, persist_report, read_url_lines, read_urls, run_check,
    save_report, CheckReport, CheckRequest, RunReport,
};
pub use storage::{
    init_db_pool_with_path, query_batch, query_batch_history, query_batch_results,
    run_migrations, BatchSummary, StoredResult,
};
pub use summary::{success_rate, ResultSummary};
