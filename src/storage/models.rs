//! Rows written to and read from the database.

use serde::{Deserialize, Serialize};

use crate::probe::ProbeResult;

/// A finished batch as handed to [`super::insert_batch_run`].
pub struct BatchRunRecord<'a> {
    /// Start time as milliseconds since Unix epoch
    pub started_at_ms: i64,
    /// End time as milliseconds since Unix epoch; also each result's check time
    pub finished_at_ms: i64,
    /// Primary DNS the run was probed with
    pub primary_dns: Option<&'a str>,
    /// Secondary DNS as supplied
    pub secondary_dns: Option<&'a str>,
    /// `standard` or `optimized`
    pub mode: &'a str,
    /// Planned batch size
    pub batch_size: usize,
    /// Per-probe timeout in seconds
    pub timeout_secs: u64,
    /// Rounded percentage of accessible results
    pub success_rate: u32,
    /// Wall time of the whole run
    pub elapsed_seconds: f64,
    /// One result per URL
    pub results: &'a [ProbeResult],
}

/// JSON blob stored in `results.remark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remark {
    /// Probe wall time in milliseconds
    pub elapsed_ms: f64,
    /// Accessibility verdict of the probe
    pub accessible: bool,
    /// Transport error text, if any
    pub error: Option<String>,
}

impl From<&ProbeResult> for Remark {
    fn from(result: &ProbeResult) -> Self {
        Self {
            elapsed_ms: result.elapsed_ms,
            accessible: result.accessible,
            error: result.error_message.clone(),
        }
    }
}

/// Summary of a stored batch, suitable for displaying batch history.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Identifier returned by `insert_batch_run`
    pub batch_id: i64,
    /// Start time as milliseconds since Unix epoch.
    pub started_at_ms: i64,
    /// End time as milliseconds since Unix epoch.
    pub finished_at_ms: i64,
    /// Primary DNS override, `None` for system resolution
    pub primary_dns: Option<String>,
    /// Secondary DNS as supplied
    pub secondary_dns: Option<String>,
    /// `standard` or `optimized`
    pub mode: String,
    /// Planned batch size
    pub batch_size: i64,
    /// Per-probe timeout in seconds
    pub timeout_secs: i64,
    /// URLs probed
    pub total_urls: i64,
    /// URLs found accessible
    pub accessible_urls: i64,
    /// Rounded percentage of accessible URLs
    pub success_rate: i64,
    /// Wall time of the whole run
    pub elapsed_seconds: f64,
}

/// One stored probe result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResult {
    /// URL as supplied in the input
    pub url: String,
    /// Final HTTP status, 0 if no response was received
    pub http_status: u16,
    /// Probe wall time in milliseconds
    pub elapsed_ms: f64,
    /// Accessibility verdict of the probe
    pub accessible: bool,
    /// Transport error text, if any
    pub error_message: Option<String>,
    /// Milliseconds since Unix epoch
    pub checked_at_ms: i64,
}
