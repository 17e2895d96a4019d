//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::summary::ResultSummary;

/// Prints a one-line summary of the run.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_run_summary(summary: &ResultSummary, elapsed_seconds: f64) {
    info!(
        "✅ Probed {} URL{} ({} accessible, {} inaccessible, {}% success) in {:.1}s",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        summary.accessible,
        summary.inaccessible,
        summary.success_rate,
        elapsed_seconds
    );
}

/// Prints per-category failure counts to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    if total_errors == 0 {
        return;
    }

    info!("Error Counts ({} total):", total_errors);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}
