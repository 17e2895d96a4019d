//! Single-URL reachability probes.
//!
//! A probe is one header-only HTTP request. Every failure mode (invalid input,
//! unusable DNS override, transport error) is folded into the returned
//! `ProbeResult`; probing never returns an error.

mod client;
mod types;

use async_trait::async_trait;

pub use client::HttpProber;
pub use types::{is_accessible, ProbeRequest, ProbeResult};

/// Something that can probe one URL.
///
/// The coordinator is generic over this trait so runs can be driven by
/// instrumented probers in tests.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes `request` and returns exactly one result for it.
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult;
}
