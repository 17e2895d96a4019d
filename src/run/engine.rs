//! The probing engine: validate, deduplicate, plan, coordinate, aggregate.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::{info, warn};
use serde::Serialize;

use crate::app::{dedupe_urls, print_error_statistics};
use crate::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_LARGE_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_BATCHES,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::coordinator::{Coordinator, RunMode};
use crate::dns::DnsConfig;
use crate::error_handling::{ConfigError, ProcessingStats};
use crate::initialization::ProbeClientSettings;
use crate::planner::{estimate_processing_time_secs, partition, plan_batch_size};
use crate::probe::{HttpProber, ProbeRequest, ProbeResult, Prober};
use crate::summary::{BatchRun, ResultSummary};

/// Input of one engine invocation.
///
/// Everything but `urls` is optional and falls back to the defaults in
/// [`crate::config`].
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    /// Raw URL strings, with or without scheme
    pub urls: Vec<String>,
    /// IPv4 address every probed host is resolved to
    pub primary_dns: Option<String>,
    /// Validated and reported, never used for probing
    pub secondary_dns: Option<String>,
    /// Per-probe timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Preferred batch size for lists up to 10,000 URLs
    pub batch_size: Option<usize>,
    /// Preferred batch size for lists above 10,000 URLs
    pub large_batch_size: Option<usize>,
    /// Batches in flight at once in optimized mode
    pub max_concurrent_batches: Option<usize>,
    /// Forced run mode; `None` picks by list size
    pub mode: Option<RunMode>,
    /// HTTP User-Agent header value
    pub user_agent: Option<String>,
}

impl CheckRequest {
    /// A request for `urls` with every setting at its default.
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Default::default()
        }
    }
}

/// Outcome of one engine invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// One result per deduplicated URL; order across batches is not guaranteed
    pub results: Vec<ProbeResult>,
    /// Percentage of accessible results, rounded
    pub success_rate: u32,
    /// Aggregate counts over `results`
    pub summary: ResultSummary,
    /// DNS settings the run used
    pub dns: DnsConfig,
    /// Case-insensitive duplicates dropped from the input
    pub duplicates_removed: usize,
    /// Planned URLs per batch
    pub batch_size: usize,
    /// Execution mode the coordinator ran in
    pub mode: RunMode,
    /// Per-probe timeout after clamping
    pub timeout_secs: u64,
    /// Upper-bound estimate made before probing
    pub estimated_seconds: u64,
    /// Unix epoch milliseconds when probing started
    pub started_at_ms: i64,
    /// Unix epoch milliseconds when the last batch finished
    pub finished_at_ms: i64,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

/// Validated settings and the deduplicated URL list.
struct PreparedCheck {
    dns: DnsConfig,
    urls: Vec<String>,
    duplicates: usize,
    timeout_secs: u64,
    batch_size: usize,
    large_batch_size: usize,
    max_concurrent_batches: usize,
    mode: Option<RunMode>,
    user_agent: String,
}

impl PreparedCheck {
    fn new(request: CheckRequest) -> Result<Self, ConfigError> {
        let dns = DnsConfig::new(request.primary_dns, request.secondary_dns)?;

        let dedup = dedupe_urls(&request.urls);
        if dedup.unique.is_empty() {
            return Err(ConfigError::NoUrls);
        }
        if dedup.duplicates > 0 {
            info!("Removed {} duplicate URLs", dedup.duplicates);
        }

        Ok(Self {
            dns,
            urls: dedup.unique,
            duplicates: dedup.duplicates,
            timeout_secs: request.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1),
            batch_size: request.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            large_batch_size: request.large_batch_size.unwrap_or(DEFAULT_LARGE_BATCH_SIZE),
            max_concurrent_batches: request
                .max_concurrent_batches
                .unwrap_or(DEFAULT_MAX_CONCURRENT_BATCHES),
            mode: request.mode,
            user_agent: request
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

/// Probes every URL of `request` over HTTP.
///
/// # Errors
///
/// Returns a `ConfigError` before any probe is issued if a DNS value is
/// malformed, the list is empty after deduplication, or the HTTP client cannot
/// be built. Individual URL failures never fail the call; they are reported in
/// the results.
///
/// # Example
///
/// ```no_run
/// use reach_check::{check_urls, CheckRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = check_urls(CheckRequest::new(vec!["example.com".to_string()])).await?;
/// println!("{}% accessible", report.success_rate);
/// # Ok(())
/// # }
/// ```
pub async fn check_urls(request: CheckRequest) -> Result<CheckReport, ConfigError> {
    let prepared = PreparedCheck::new(request)?;
    let stats = Arc::new(ProcessingStats::new());
    let settings = ProbeClientSettings {
        timeout_secs: prepared.timeout_secs,
        user_agent: prepared.user_agent.clone(),
    };
    let prober = HttpProber::new(settings, Arc::clone(&stats))
        .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    let report = execute(prepared, Arc::new(prober)).await;
    print_error_statistics(&stats);
    Ok(report)
}

/// Runs the engine with a caller-supplied prober.
///
/// Same validation and scheduling as [`check_urls`]; only the probe
/// implementation differs.
///
/// # Errors
///
/// Returns a `ConfigError` if a DNS value is malformed or the list is empty
/// after deduplication.
pub async fn check_urls_with<P: Prober>(
    request: CheckRequest,
    prober: Arc<P>,
) -> Result<CheckReport, ConfigError> {
    let prepared = PreparedCheck::new(request)?;
    Ok(execute(prepared, prober).await)
}

async fn execute<P: Prober>(prepared: PreparedCheck, prober: Arc<P>) -> CheckReport {
    let started_at_ms = Utc::now().timestamp_millis();
    let start = Instant::now();

    let url_count = prepared.urls.len();
    let batch_size = plan_batch_size(url_count, prepared.batch_size, prepared.large_batch_size);
    let mode = prepared
        .mode
        .unwrap_or_else(|| RunMode::for_url_count(url_count));
    let estimated_seconds =
        estimate_processing_time_secs(url_count, batch_size, prepared.timeout_secs);
    info!(
        "Checking {} URLs: batch size {}, {} mode, estimated at most {}s",
        url_count, batch_size, mode, estimated_seconds
    );

    let dns = Arc::new(prepared.dns);
    let requests: Vec<ProbeRequest> = prepared
        .urls
        .iter()
        .map(|url| ProbeRequest::new(url.as_str(), Arc::clone(&dns), prepared.timeout_secs))
        .collect();
    let mut run = BatchRun::new(prepared.urls, dns.as_ref().clone());

    let coordinator = Coordinator::new(prober, prepared.max_concurrent_batches);
    run.record(
        coordinator
            .run_all(partition(requests, batch_size), mode)
            .await,
    );
    let success_rate = run.finalize();
    if !run.is_complete() {
        warn!(
            "Expected {} results but got {}",
            run.total_count,
            run.results.len()
        );
    }

    let summary = ResultSummary::from_results(&run.results);
    CheckReport {
        results: run.results,
        success_rate,
        summary,
        dns: run.dns,
        duplicates_removed: prepared.duplicates,
        batch_size,
        mode,
        timeout_secs: prepared.timeout_secs,
        estimated_seconds,
        started_at_ms,
        finished_at_ms: Utc::now().timestamp_millis(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers 200 for hosts starting with "up", 503 otherwise.
    struct StaticProber;

    #[async_trait]
    impl Prober for StaticProber {
        async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
            let Some(url) = request.normalized_url() else {
                return ProbeResult::invalid_url(request.raw_input());
            };
            let status = if url.host_str().is_some_and(|h| h.starts_with("up")) {
                200
            } else {
                503
            };
            ProbeResult::from_response(request.raw_input(), status, Duration::from_millis(1))
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_check_urls_with_dedups_and_aggregates() {
        let request = CheckRequest::new(urls(&[
            "up.test",
            "UP.test",
            "down.test",
            "bad url",
            "up2.test",
        ]));
        let report = check_urls_with(request, Arc::new(StaticProber))
            .await
            .expect("valid request");

        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.success_rate, 50);
        assert_eq!(report.summary.invalid, 1);
        assert_eq!(report.summary.http_errors, 1);
        assert_eq!(report.mode, RunMode::Standard);
        assert_eq!(report.batch_size, 100);
        assert_eq!(report.estimated_seconds, 30);
    }

    #[tokio::test]
    async fn test_check_urls_rejects_bad_dns_before_probing() {
        let request = CheckRequest {
            primary_dns: Some("8.8.8".to_string()),
            ..CheckRequest::new(urls(&["up.test"]))
        };
        let err = check_urls_with(request, Arc::new(StaticProber))
            .await
            .expect_err("malformed DNS");
        assert_eq!(
            err,
            ConfigError::InvalidDns {
                field: "primary",
                value: "8.8.8".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_check_urls_rejects_non_ascii_dns_digits() {
        let dns = "\u{0661}.\u{0661}.\u{0661}.\u{0661}";
        let request = CheckRequest {
            primary_dns: Some(dns.to_string()),
            ..CheckRequest::new(urls(&["up.test"]))
        };
        let err = check_urls_with(request, Arc::new(StaticProber))
            .await
            .expect_err("non-ASCII digits are not a dotted quad");
        assert_eq!(
            err,
            ConfigError::InvalidDns {
                field: "primary",
                value: dns.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_check_urls_rejects_empty_list() {
        let err = check_urls(CheckRequest::new(urls(&["", "   "])))
            .await
            .expect_err("no URLs");
        assert_eq!(err, ConfigError::NoUrls);
    }

    #[tokio::test]
    async fn test_check_urls_forced_mode_and_clamped_timeout() {
        let request = CheckRequest {
            mode: Some(RunMode::Optimized),
            timeout_secs: Some(0),
            batch_size: Some(2),
            ..CheckRequest::new(urls(&["up1.test", "up2.test", "up3.test"]))
        };
        let report = check_urls_with(request, Arc::new(StaticProber))
            .await
            .expect("valid request");
        assert_eq!(report.mode, RunMode::Optimized);
        assert_eq!(report.timeout_secs, 1);
        assert_eq!(report.batch_size, 2);
        assert_eq!(report.estimated_seconds, 2);
        assert_eq!(report.success_rate, 100);
    }

    #[tokio::test]
    async fn test_check_urls_all_invalid_needs_no_network() {
        let report = check_urls(CheckRequest::new(urls(&["not a url!!", "bad url"])))
            .await
            .expect("valid request");
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.success_rate, 0);
        assert!(report
            .results
            .iter()
            .all(|r| r.http_status == 0 && r.error_message.as_deref() == Some("Invalid URL format")));
    }
}
