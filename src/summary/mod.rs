//! Result aggregation.

use serde::{Deserialize, Serialize};

use crate::config::INVALID_URL_MESSAGE;
use crate::dns::DnsConfig;
use crate::probe::ProbeResult;

/// Percentage of accessible results, rounded to the nearest integer.
///
/// Returns 0 for an empty slice.
pub fn success_rate(results: &[ProbeResult]) -> u32 {
    if results.is_empty() {
        return 0;
    }
    let accessible = results.iter().filter(|r| r.accessible).count();
    (100.0 * accessible as f64 / results.len() as f64).round() as u32
}

/// Counts over a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Results in the run, one per deduplicated URL
    pub total: usize,
    /// Results with `accessible == true`
    pub accessible: usize,
    /// `total - accessible`
    pub inaccessible: usize,
    /// Inputs rejected by URL normalization
    pub invalid: usize,
    /// Probes that got no HTTP response (invalid inputs excluded)
    pub transport_errors: usize,
    /// Probes answered with a status outside 200-399
    pub http_errors: usize,
    /// See [`success_rate`]
    pub success_rate: u32,
    /// Mean wall time over all results, two decimals
    pub average_elapsed_ms: f64,
}

impl ResultSummary {
    /// Counts `results`.
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = ResultSummary {
            total: results.len(),
            success_rate: success_rate(results),
            ..Default::default()
        };

        let mut elapsed_total = 0.0;
        for result in results {
            elapsed_total += result.elapsed_ms;
            if result.accessible {
                summary.accessible += 1;
                continue;
            }
            summary.inaccessible += 1;
            match result.error_message.as_deref() {
                Some(INVALID_URL_MESSAGE) => summary.invalid += 1,
                Some(_) => summary.transport_errors += 1,
                None => summary.http_errors += 1,
            }
        }

        if !results.is_empty() {
            let mean = elapsed_total / results.len() as f64;
            summary.average_elapsed_ms = (mean * 100.0).round() / 100.0;
        }
        summary
    }
}

/// Accumulates the results of one invocation.
///
/// Created before probing starts, filled after each batch or window merge,
/// then finalized once every batch has completed.
#[derive(Debug, Clone, Default)]
pub struct BatchRun {
    /// Deduplicated URLs of the run
    pub urls: Vec<String>,
    /// DNS settings the run was probed with
    pub dns: DnsConfig,
    /// Number of URLs, and so the expected number of results
    pub total_count: usize,
    /// Results merged so far
    pub results: Vec<ProbeResult>,
    /// Set by [`BatchRun::finalize`]
    pub success_rate: Option<u32>,
}

impl BatchRun {
    /// Starts a run over `urls` with no results yet.
    pub fn new(urls: Vec<String>, dns: DnsConfig) -> Self {
        let total_count = urls.len();
        Self {
            urls,
            dns,
            total_count,
            results: Vec::with_capacity(total_count),
            success_rate: None,
        }
    }

    /// Appends the results of a completed batch or window.
    pub fn record(&mut self, results: impl IntoIterator<Item = ProbeResult>) {
        self.results.extend(results);
    }

    /// Computes the success rate and returns it.
    pub fn finalize(&mut self) -> u32 {
        let rate = success_rate(&self.results);
        self.success_rate = Some(rate);
        rate
    }

    /// Whether every URL has exactly one result.
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.total_count
    }
}
