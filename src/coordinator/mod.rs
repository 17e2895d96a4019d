//! Concurrency coordination across batches.
//!
//! Standard mode runs one batch at a time. Optimized mode runs windows of up
//! to `max_concurrent_batches` batches, pausing briefly between windows. In
//! both modes every probe of a running batch is in flight at once; the batch
//! size is the only per-batch cap.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use log::info;
use serde::{Deserialize, Serialize};

use crate::app::log_progress;
use crate::config::{DEFAULT_MAX_CONCURRENT_BATCHES, OPTIMIZED_MODE_THRESHOLD, WINDOW_PACING_DELAY};
use crate::planner::Batch;
use crate::probe::{ProbeRequest, ProbeResult, Prober};

/// How batches are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Batches run sequentially
    Standard,
    /// Windows of batches run concurrently
    Optimized,
}

impl RunMode {
    /// Optimized for lists above 10,000 URLs, standard otherwise.
    pub fn for_url_count(url_count: usize) -> Self {
        if url_count > OPTIMIZED_MODE_THRESHOLD {
            RunMode::Optimized
        } else {
            RunMode::Standard
        }
    }

    /// Lowercase name, as stored with each batch.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Standard => "standard",
            RunMode::Optimized => "optimized",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processed-URL counter for one run.
#[derive(Debug)]
pub struct Progress {
    processed: AtomicUsize,
    total: usize,
}

impl Progress {
    /// A counter for a run of `total` URLs.
    pub fn new(total: usize) -> Self {
        Self {
            processed: AtomicUsize::new(0),
            total,
        }
    }

    /// Records `count` more processed URLs and returns the new total.
    pub fn advance(&self, count: usize) -> usize {
        self.processed.fetch_add(count, Ordering::SeqCst) + count
    }

    /// URLs processed so far.
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// URLs in the run.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of processed URLs in percent, rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let pct = self.processed() as f64 / self.total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Drives a [`Prober`] across batches.
pub struct Coordinator<P> {
    prober: Arc<P>,
    max_concurrent_batches: usize,
    pacing_delay: Duration,
}

impl<P: Prober> Coordinator<P> {
    /// Creates a coordinator. `max_concurrent_batches` is clamped to at least 1.
    pub fn new(prober: Arc<P>, max_concurrent_batches: usize) -> Self {
        Self {
            prober,
            max_concurrent_batches: max_concurrent_batches.max(1),
            pacing_delay: WINDOW_PACING_DELAY,
        }
    }

    /// Coordinator with the default window width of 3 batches.
    pub fn with_default_concurrency(prober: Arc<P>) -> Self {
        Self::new(prober, DEFAULT_MAX_CONCURRENT_BATCHES)
    }

    /// Overrides the pause between optimized-mode windows.
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// The prober every batch is run with.
    pub fn prober(&self) -> &Arc<P> {
        &self.prober
    }

    /// Probes every request in `batches` and returns one result per request.
    ///
    /// Results are merged batch by batch (window by window in optimized mode),
    /// so order is kept within a batch but not guaranteed across batches in
    /// optimized mode. Empty input returns an empty vector without probing.
    pub async fn run_all(&self, batches: Vec<Batch>, mode: RunMode) -> Vec<ProbeResult> {
        let total: usize = batches.iter().map(Vec::len).sum();
        let mut results = Vec::with_capacity(total);
        if total == 0 {
            return results;
        }

        info!(
            "Probing {} URLs in {} batches ({} mode)",
            total,
            batches.len(),
            mode
        );
        let progress = Progress::new(total);
        let start = Instant::now();

        match mode {
            RunMode::Standard => {
                for batch in &batches {
                    results.extend(self.run_batch(batch, &progress).await);
                    log_progress(start, &progress);
                }
            }
            RunMode::Optimized => {
                let mut windows = batches.chunks(self.max_concurrent_batches).peekable();
                while let Some(window) = windows.next() {
                    let window_results =
                        join_all(window.iter().map(|batch| self.run_batch(batch, &progress))).await;
                    results.extend(window_results.into_iter().flatten());
                    log_progress(start, &progress);

                    if windows.peek().is_some() && !self.pacing_delay.is_zero() {
                        tokio::time::sleep(self.pacing_delay).await;
                    }
                }
            }
        }

        results
    }

    async fn run_batch(&self, batch: &[ProbeRequest], progress: &Progress) -> Vec<ProbeResult> {
        let results = join_all(batch.iter().map(|request| self.prober.probe(request))).await;
        progress.advance(results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::DnsConfig;
    use crate::planner::partition;
    use async_trait::async_trait;

    /// Records how many probes are in flight at once.
    #[derive(Default)]
    struct CountingProber {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Prober for CountingProber {
        async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            ProbeResult::from_response(request.raw_input(), 200, Duration::from_millis(20))
        }
    }

    fn batches(count: usize, batch_size: usize) -> Vec<Batch> {
        let dns = Arc::new(DnsConfig::default());
        let requests = (0..count)
            .map(|i| ProbeRequest::new(format!("host{i}.test"), Arc::clone(&dns), 5))
            .collect();
        partition(requests, batch_size)
    }

    #[test]
    fn test_run_mode_threshold() {
        assert_eq!(RunMode::for_url_count(0), RunMode::Standard);
        assert_eq!(RunMode::for_url_count(10_000), RunMode::Standard);
        assert_eq!(RunMode::for_url_count(10_001), RunMode::Optimized);
        assert_eq!(RunMode::Optimized.to_string(), "optimized");
    }

    #[test]
    fn test_progress_percentage_rounding() {
        let progress = Progress::new(3);
        assert_eq!(progress.percentage(), 0.0);
        assert_eq!(progress.advance(1), 1);
        assert_eq!(progress.percentage(), 33.33);
        progress.advance(1);
        assert_eq!(progress.percentage(), 66.67);
        progress.advance(1);
        assert_eq!(progress.percentage(), 100.0);
        assert_eq!(Progress::new(0).percentage(), 0.0);
    }

    #[tokio::test]
    async fn test_standard_mode_runs_one_batch_at_a_time() {
        let prober = Arc::new(CountingProber::default());
        let coordinator = Coordinator::new(Arc::clone(&prober), 3);
        let results = coordinator.run_all(batches(10, 4), RunMode::Standard).await;

        assert_eq!(results.len(), 10);
        assert_eq!(prober.calls.load(Ordering::SeqCst), 10);
        assert!(prober.max_in_flight.load(Ordering::SeqCst) <= 4);
        // Sequential batches keep input order
        let urls: Vec<_> = results.iter().map(|r| r.url.clone()).collect();
        let expected: Vec<_> = (0..10).map(|i| format!("host{i}.test")).collect();
        assert_eq!(urls, expected);
    }

    #[tokio::test]
    async fn test_optimized_mode_caps_in_flight_probes() {
        let prober = Arc::new(CountingProber::default());
        let coordinator =
            Coordinator::new(Arc::clone(&prober), 3).with_pacing_delay(Duration::from_millis(5));
        let results = coordinator.run_all(batches(40, 4), RunMode::Optimized).await;

        assert_eq!(results.len(), 40);
        let max = prober.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3 * 4, "max in flight was {max}");
        assert!(max > 4, "windows should overlap batches, max was {max}");
    }

    #[tokio::test]
    async fn test_optimized_mode_paces_between_windows_only() {
        let prober = Arc::new(CountingProber::default());
        let coordinator =
            Coordinator::new(Arc::clone(&prober), 2).with_pacing_delay(Duration::from_millis(150));

        // Two batches fit in one window: no pause
        let start = Instant::now();
        coordinator.run_all(batches(4, 2), RunMode::Optimized).await;
        assert!(start.elapsed() < Duration::from_millis(150));

        // Three batches need two windows: exactly one pause
        let start = Instant::now();
        coordinator.run_all(batches(6, 2), RunMode::Optimized).await;
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_every_url_gets_exactly_one_result() {
        let prober = Arc::new(CountingProber::default());
        let coordinator =
            Coordinator::new(Arc::clone(&prober), 3).with_pacing_delay(Duration::ZERO);
        let mut urls: Vec<_> = coordinator
            .run_all(batches(23, 5), RunMode::Optimized)
            .await
            .into_iter()
            .map(|r| r.url)
            .collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 23);
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let prober = Arc::new(CountingProber::default());
        let coordinator = Coordinator::with_default_concurrency(Arc::clone(&prober));
        assert!(coordinator.run_all(Vec::new(), RunMode::Optimized).await.is_empty());
        assert!(coordinator.run_all(Vec::new(), RunMode::Standard).await.is_empty());
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }
}
