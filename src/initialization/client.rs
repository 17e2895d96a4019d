//! HTTP client initialization.
//!
//! Probe clients share one configuration: total and connect timeouts, a
//! five-hop redirect limit, disabled certificate checks and no idle
//! connection reuse, so every probe opens (and resolves) a fresh connection.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{MAX_CONNECT_TIMEOUT_SECS, MAX_REDIRECT_HOPS};

/// Settings shared by every probe client of a run.
#[derive(Debug, Clone)]
pub struct ProbeClientSettings {
    /// Total per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl ProbeClientSettings {
    /// Total timeout for one probe.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connection-establishment timeout: `min(10s, timeout / 3)`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs_f64(MAX_CONNECT_TIMEOUT_SECS.min(self.timeout_secs as f64 / 3.0))
    }
}

/// Initializes a probe client.
///
/// Creates a `reqwest::Client` configured with:
/// - Total timeout and connect timeout from `settings`
/// - Redirect following (up to `MAX_REDIRECT_HOPS`)
/// - TLS certificate and hostname verification disabled
/// - No pooled idle connections
///
/// When `resolve_override` is given, that hostname resolves to the given
/// address for this client only. The port in the address is ignored; the
/// URL's port is used.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(
    settings: &ProbeClientSettings,
    resolve_override: Option<(&str, SocketAddr)>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .timeout(settings.timeout())
        .connect_timeout(settings.connect_timeout())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .user_agent(settings.user_agent.clone())
        .pool_max_idle_per_host(0);

    if let Some((host, addr)) = resolve_override {
        builder = builder.resolve(host, addr);
    }

    builder.build()
}
