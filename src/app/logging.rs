//! Progress logging utilities.

use log::info;
use std::time::Instant;

use crate::coordinator::Progress;

/// Logs progress information about URL probing.
///
/// # Arguments
///
/// * `start_time` - The start time of the run
/// * `progress` - Processed-URL counter of the run
pub fn log_progress(start_time: Instant, progress: &Progress) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let processed = progress.processed();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} URLs ({:.2}%) in {:.2} seconds (~{:.2} URLs/sec)",
        processed,
        progress.total(),
        progress.percentage(),
        elapsed_secs,
        rate
    );
}
