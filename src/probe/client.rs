//! HTTP-backed prober.

use std::error::Error as StdError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, trace};

use crate::dns::parse_override_ip;
use crate::error_handling::{
    categorize_status, update_error_stats, ErrorType, InitializationError, ProcessingStats,
};
use crate::initialization::{init_probe_client, ProbeClientSettings};

use super::types::{ProbeRequest, ProbeResult};
use super::Prober;

/// Issues one HEAD request per probe with `reqwest`.
///
/// Probes without a DNS override share one client. A primary DNS override
/// needs a resolve entry for the probed host, so those probes build a
/// dedicated client that lives for the one request.
pub struct HttpProber {
    client: reqwest::Client,
    settings: ProbeClientSettings,
    stats: Arc<ProcessingStats>,
}

impl HttpProber {
    /// Creates a prober for a run.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the shared client
    /// cannot be built.
    pub fn new(
        settings: ProbeClientSettings,
        stats: Arc<ProcessingStats>,
    ) -> Result<Self, InitializationError> {
        let client = init_probe_client(&settings, None)?;
        Ok(Self {
            client,
            settings,
            stats,
        })
    }

    /// Failure counters recorded by this prober.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Picks the client for `request`, building a per-probe one when the
    /// primary DNS override applies.
    fn client_for(&self, request: &ProbeRequest, host: &str) -> Result<reqwest::Client, String> {
        let Some(dns) = request.dns().primary_override() else {
            return Ok(self.client.clone());
        };

        let ip = parse_override_ip(dns)
            .ok_or_else(|| format!("DNS override address is not a usable IPv4 address: {dns}"))?;
        let addr = SocketAddr::new(IpAddr::V4(ip), 0);
        init_probe_client(&self.settings, Some((host, addr)))
            .map_err(|e| format!("Failed to build client for DNS override {dns}: {e}"))
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        let raw = request.raw_input();
        let Some(url) = request.normalized_url() else {
            self.stats.increment_error(ErrorType::InvalidUrl);
            return ProbeResult::invalid_url(raw);
        };

        let host = url.host_str().unwrap_or_default();
        let client = match self.client_for(request, host) {
            Ok(client) => client,
            Err(message) => {
                debug!("Skipping probe of {raw}: {message}");
                self.stats.increment_error(ErrorType::InvalidDnsOverride);
                return ProbeResult::transport_failure(raw, 0, Duration::ZERO, message);
            }
        };

        trace!("HEAD {url}");
        let start = Instant::now();
        let response = client
            .head(url.clone())
            .timeout(Duration::from_secs(request.timeout_secs()))
            .send()
            .await;
        let elapsed = start.elapsed();

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                if let Some(error_type) = categorize_status(status) {
                    self.stats.increment_error(error_type);
                }
                debug!("{raw} -> {status} in {:.0}ms", elapsed.as_secs_f64() * 1000.0);
                ProbeResult::from_response(raw, status, elapsed)
            }
            Err(e) => {
                update_error_stats(&self.stats, &e);
                let status = e.status().map(|s| s.as_u16()).unwrap_or(0);
                let message = error_chain_message(&e);
                debug!("{raw} failed: {message}");
                ProbeResult::transport_failure(raw, status, elapsed, message)
            }
        }
    }
}

/// Joins an error and its sources into one line.
///
/// `reqwest` keeps the useful part (refused, timed out, dns error) in the
/// source chain rather than the top-level message.
fn error_chain_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
