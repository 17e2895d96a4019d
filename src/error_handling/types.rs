//! Error type definitions.
//!
//! This module defines the run-level error enums and the categories used to
//! count per-probe failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Caller-level configuration errors.
///
/// These reject a whole run before any probe is issued, unlike per-URL
/// failures which always end up inside a `ProbeResult`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A DNS field is neither empty nor a dotted-quad IPv4 shape.
    #[error("Invalid {field} DNS server: {value:?} (expected a dotted-quad IPv4 address)")]
    InvalidDns {
        /// `primary` or `secondary`
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// The URL list is empty once blank lines and duplicates are removed.
    #[error("No URLs to check")]
    NoUrls,

    /// The probe client could not be built from the run settings.
    #[error("HTTP client initialization error: {0}")]
    HttpClient(String),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Result remark could not be encoded or decoded.
    #[error("Remark serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Categories of probes that did not come back accessible.
///
/// Transport categories mirror the `reqwest::Error` predicates; status
/// categories cover probes that got an HTTP response outside 200-399.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Input could not be normalized into an http(s) URL
    InvalidUrl,
    /// Primary DNS passed shape validation but is not an IPv4 address
    InvalidDnsOverride,
    /// Request could not be built
    HttpRequestBuilderError,
    /// Redirect limit exceeded or redirect loop
    HttpRequestRedirectError,
    /// No response within the timeout
    HttpRequestTimeoutError,
    /// Connection could not be established
    HttpRequestConnectError,
    /// Request failed while being sent
    HttpRequestRequestError,
    /// Response body error
    HttpRequestBodyError,
    /// Response could not be decoded
    HttpRequestDecodeError,
    /// Transport error matching no other category
    HttpRequestOtherError,
    /// Final status in 400-499
    HttpStatusClientError,
    /// Final status in 500-599
    HttpStatusServerError,
    /// Final status outside 200-599
    HttpStatusOther,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "Invalid URL format",
            ErrorType::InvalidDnsOverride => "Unusable DNS override address",
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpStatusClientError => "Client error status (4xx)",
            ErrorType::HttpStatusServerError => "Server error status (5xx)",
            ErrorType::HttpStatusOther => "Other non-success status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str() {
        assert_eq!(
            ErrorType::HttpRequestTimeoutError.as_str(),
            "HTTP request timeout error"
        );
        assert_eq!(ErrorType::InvalidUrl.as_str(), "Invalid URL format");
        assert_eq!(
            ErrorType::HttpStatusServerError.to_string(),
            "Server error status (5xx)"
        );
    }

    #[test]
    fn test_all_error_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            let str_repr = error_type.as_str();
            assert!(
                !str_repr.is_empty(),
                "{:?} should have non-empty string",
                error_type
            );
        }
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidDns {
            field: "primary",
            value: "8.8.8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid primary DNS server: \"8.8.8\" (expected a dotted-quad IPv4 address)"
        );
        assert_eq!(ConfigError::NoUrls.to_string(), "No URLs to check");
    }
}
