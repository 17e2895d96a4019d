//! Probe request and result types.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::normalize_url;
use crate::config::INVALID_URL_MESSAGE;
use crate::dns::DnsConfig;

/// One URL to probe, normalized once at construction.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    raw_input: String,
    normalized: Option<Url>,
    dns: Arc<DnsConfig>,
    timeout_secs: u64,
}

impl ProbeRequest {
    /// Builds a request, normalizing `raw_input`.
    ///
    /// An input that fails normalization still produces a request; probing it
    /// yields the "Invalid URL format" result without touching the network.
    pub fn new(raw_input: impl Into<String>, dns: Arc<DnsConfig>, timeout_secs: u64) -> Self {
        let raw_input = raw_input.into();
        let normalized = normalize_url(&raw_input);
        Self {
            raw_input,
            normalized,
            dns,
            timeout_secs,
        }
    }

    /// The input exactly as supplied by the caller.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The normalized URL, or `None` if the input is not a valid URL.
    pub fn normalized_url(&self) -> Option<&Url> {
        self.normalized.as_ref()
    }

    /// DNS settings shared by every probe of the run.
    pub fn dns(&self) -> &DnsConfig {
        &self.dns
    }

    /// Total timeout for this probe in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

/// Outcome of one probe.
///
/// `accessible` holds exactly when `200 <= http_status < 400` and there was no
/// transport error; the constructors are the only way results are built, so
/// the invariant holds for every value produced by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The original input, used to correlate results with the URL list
    pub url: String,
    /// Final HTTP status, 0 if no response was received
    pub http_status: u16,
    /// Wall time in milliseconds, rounded to two decimals
    pub elapsed_ms: f64,
    /// 2xx/3xx status and no transport error
    pub accessible: bool,
    /// Transport error text, `None` whenever a response was received
    pub error_message: Option<String>,
}

impl ProbeResult {
    /// Result for an input that failed normalization.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::transport_failure(url, 0, Duration::ZERO, INVALID_URL_MESSAGE)
    }

    /// Result for a probe that received an HTTP response.
    pub fn from_response(url: impl Into<String>, http_status: u16, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            http_status,
            elapsed_ms: round_elapsed_ms(elapsed),
            accessible: is_accessible(http_status, false),
            error_message: None,
        }
    }

    /// Result for a probe that failed before (or while) receiving a response.
    pub fn transport_failure(
        url: impl Into<String>,
        http_status: u16,
        elapsed: Duration,
        message: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            http_status,
            elapsed_ms: round_elapsed_ms(elapsed),
            accessible: false,
            error_message: Some(message.into()),
        }
    }
}

/// The accessibility predicate: a 2xx/3xx status and no transport error.
pub fn is_accessible(http_status: u16, transport_error: bool) -> bool {
    (200..400).contains(&http_status) && !transport_error
}

fn round_elapsed_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
