//! DNS server string validation.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error_handling::ConfigError;

/// Dotted-quad shape of ASCII digits only; octet ranges are not checked.
static DNS_SERVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$")
        .expect("DNS pattern is a valid regex")
});

/// Returns `true` if `value` is empty (system default) or has dotted-quad shape.
///
/// `999.999.999.999` is accepted: only the shape is validated.
pub fn is_valid_dns_server(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || DNS_SERVER_PATTERN.is_match(trimmed)
}

/// Parses a validated DNS value into an address usable as a resolve override.
///
/// Returns `None` for shapes that pass validation but are not real IPv4
/// addresses (any octet above 255).
pub fn parse_override_ip(value: &str) -> Option<Ipv4Addr> {
    value.trim().parse().ok()
}

/// DNS settings for one run.
///
/// Read-only once built; every probe of the run sees the same values.
/// Only `primary` is ever applied to probes. `secondary` is kept so it can be
/// stored alongside the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    /// Address every probed hostname resolves to, if set
    pub primary: Option<String>,
    /// Secondary server; never used as a fallback
    pub secondary: Option<String>,
}

impl DnsConfig {
    /// Validates and builds a DNS configuration.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDns` if a non-blank value is not a dotted quad.
    pub fn new(primary: Option<String>, secondary: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            primary: Self::checked("primary", primary)?,
            secondary: Self::checked("secondary", secondary)?,
        })
    }

    fn checked(field: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
        match value.map(|v| v.trim().to_string()) {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(None),
            Some(v) if is_valid_dns_server(&v) => Ok(Some(v)),
            Some(v) => Err(ConfigError::InvalidDns { field, value: v }),
        }
    }

    /// The primary DNS value applied as the per-probe resolve override.
    pub fn primary_override(&self) -> Option<&str> {
        self.primary.as_deref()
    }
}
