//! Error handling and processing statistics.
//!
//! This module provides:
//! - Run-level error enums (`ConfigError`, `DatabaseError`, `InitializationError`)
//! - Per-probe failure categories (`ErrorType`) and their counters
//! - Error type extraction from `reqwest` errors and HTTP statuses

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{ConfigError, DatabaseError, ErrorType, InitializationError};
