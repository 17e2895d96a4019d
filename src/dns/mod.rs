//! DNS configuration helpers.
//!
//! This module provides:
//! - Validation of caller-supplied DNS server strings
//! - The per-probe resolution override derived from the primary DNS value
//! - Best-effort platform adapters: host resolver detection and DNS cache flush
//!
//! Nothing in here runs implicitly during a probe run; the platform adapters
//! are only reached through explicit calls.

mod system;
mod validation;

// Re-export public API
pub use system::{detect_system_dns, flush_system_dns_cache, DetectedDns};
pub use validation::{is_valid_dns_server, parse_override_ip, DnsConfig};
