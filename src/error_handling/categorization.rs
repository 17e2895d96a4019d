//! Error categorization.
//!
//! Maps transport errors and HTTP statuses onto `ErrorType` buckets.

use super::stats::ProcessingStats;
use super::types::ErrorType;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Timeouts are checked before connect errors: a connect timeout reports both
/// and is more useful as a timeout.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes an HTTP status that is outside the accessible range.
///
/// Returns `None` for 200-399.
pub fn categorize_status(status: u16) -> Option<ErrorType> {
    match status {
        200..=399 => None,
        400..=499 => Some(ErrorType::HttpStatusClientError),
        500..=599 => Some(ErrorType::HttpStatusServerError),
        _ => Some(ErrorType::HttpStatusOther),
    }
}

/// Updates processing statistics based on a `reqwest::Error`.
pub fn update_error_stats(stats: &ProcessingStats, error: &reqwest::Error) {
    stats.increment_error(categorize_reqwest_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_status_accessible_range() {
        assert_eq!(categorize_status(200), None);
        assert_eq!(categorize_status(301), None);
        assert_eq!(categorize_status(399), None);
    }

    #[test]
    fn test_categorize_status_failures() {
        assert_eq!(categorize_status(404), Some(ErrorType::HttpStatusClientError));
        assert_eq!(categorize_status(503), Some(ErrorType::HttpStatusServerError));
        assert_eq!(categorize_status(101), Some(ErrorType::HttpStatusOther));
        assert_eq!(categorize_status(0), Some(ErrorType::HttpStatusOther));
    }

    #[tokio::test]
    async fn test_categorize_connect_error() {
        // Port 1 on loopback is closed on any sane test host
        let client = reqwest::Client::new();
        let err = client
            .head("http://127.0.0.1:1/")
            .send()
            .await
            .expect_err("connection should be refused");
        assert_eq!(
            categorize_reqwest_error(&err),
            ErrorType::HttpRequestConnectError
        );
    }

    #[test]
    fn test_update_error_stats_from_builder_error() {
        let err = reqwest::Client::new()
            .head("not a url")
            .build()
            .expect_err("relative URL must not build");
        let stats = ProcessingStats::new();
        update_error_stats(&stats, &err);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestBuilderError), 1);
        assert_eq!(stats.total_errors(), 1);
    }
}
