//! Configuration constants.
//!
//! This module defines the defaults and limits used by the probing engine:
//! timeouts, batch-size tiers, window pacing and the database location.

use std::time::Duration;

/// Default SQLite database path
pub const DB_PATH: &str = "./reach_check.db";

// Probe timeouts
/// Default total per-probe timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Upper bound for the connection-establishment timeout in seconds.
/// The effective value is `min(MAX_CONNECT_TIMEOUT_SECS, timeout / 3)`.
pub const MAX_CONNECT_TIMEOUT_SECS: f64 = 10.0;

// Redirect handling
/// Maximum number of redirect hops followed by a probe
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Default User-Agent string for probes.
///
/// A desktop Chrome string keeps trivial bot-blocking from turning reachable
/// hosts into 403s. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Batch planning
/// Default batch size preferred by users for small and medium lists
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Default batch size used for very large lists
pub const DEFAULT_LARGE_BATCH_SIZE: usize = 1000;
/// Lists up to this size use the user's batch size unchanged
pub const SMALL_LIST_MAX: usize = 1_000;
/// Lists up to this size are clamped to `MEDIUM_LIST_BATCH_CAP`
pub const MEDIUM_LIST_MAX: usize = 10_000;
/// Batch size cap for medium lists
pub const MEDIUM_LIST_BATCH_CAP: usize = 250;
/// Lists up to this size are clamped to `LARGE_LIST_BATCH_CAP`
pub const LARGE_LIST_MAX: usize = 50_000;
/// Batch size cap for large lists
pub const LARGE_LIST_BATCH_CAP: usize = 500;

// Coordination
/// Lists larger than this run in optimized (windowed) mode when the mode is automatic
pub const OPTIMIZED_MODE_THRESHOLD: usize = 10_000;
/// Default number of batches allowed in flight at once in optimized mode
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 3;
/// Pause between windows in optimized mode, so sockets and file descriptors drain
pub const WINDOW_PACING_DELAY: Duration = Duration::from_millis(100);

// Result messages
/// Error message of probes whose input failed URL normalization
pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";
