//! Engine entry points.
//!
//! [`check_urls`] is the engine proper: it takes a URL list and settings and
//! returns a report. [`run_check`] wraps it for the CLI: it reads the input
//! file, prints the summary and stores the batch.

mod engine;
mod finalize;
mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::print_run_summary;
use crate::config::Config;

pub use engine::{check_urls, check_urls_with, CheckReport, CheckRequest};
pub use finalize::{persist_report, save_report};
pub use input::{read_url_lines, read_urls};

/// Results of a CLI-level check run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The engine's report
    pub check: CheckReport,
    /// Identifier of the stored batch, `None` when saving was disabled
    pub batch_id: Option<i64>,
    /// Path to the SQLite database
    pub db_path: PathBuf,
}

impl CheckRequest {
    /// Builds an engine request from library configuration and a URL list.
    pub fn from_config(config: &Config, urls: Vec<String>) -> Self {
        Self {
            urls,
            primary_dns: config.primary_dns.clone(),
            secondary_dns: config.secondary_dns.clone(),
            timeout_secs: Some(config.timeout_seconds),
            batch_size: Some(config.batch_size),
            large_batch_size: Some(config.large_batch_size),
            max_concurrent_batches: Some(config.max_concurrent_batches),
            mode: config.mode.fixed(),
            user_agent: Some(config.user_agent.clone()),
        }
    }
}

/// Runs a check with the provided configuration.
///
/// Reads URLs from the input file (or stdin), probes them, prints a summary
/// and stores the batch unless `config.save` is false.
///
/// # Errors
///
/// This function will return an error if:
/// - The input file cannot be read
/// - The run is rejected (malformed DNS, no URLs)
/// - The batch cannot be stored
///
/// # Example
///
/// ```no_run
/// use reach_check::{run_check, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     file: PathBuf::from("urls.txt"),
///     ..Default::default()
/// };
/// let report = run_check(config).await?;
/// println!("{}% accessible", report.check.success_rate);
/// # Ok(())
/// # }
/// ```
pub async fn run_check(config: Config) -> Result<RunReport> {
    let urls = read_urls(&config.file).await?;
    let check = check_urls(CheckRequest::from_config(&config, urls))
        .await
        .context("Check rejected")?;

    print_run_summary(&check.summary, check.elapsed_seconds);

    let batch_id = if config.save {
        Some(persist_report(&config.db_path, &check).await?)
    } else {
        None
    };

    Ok(RunReport {
        check,
        batch_id,
        db_path: config.db_path,
    })
}
