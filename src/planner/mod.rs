//! Batch planning: batch size tiering, run time estimates and partitioning.

use crate::config::{
    LARGE_LIST_BATCH_CAP, LARGE_LIST_MAX, MEDIUM_LIST_BATCH_CAP, MEDIUM_LIST_MAX, SMALL_LIST_MAX,
};
use crate::probe::ProbeRequest;

/// An ordered group of probes scheduled together.
pub type Batch = Vec<ProbeRequest>;

/// Chooses the batch size for a list of `url_count` URLs.
///
/// | URLs            | Batch size                        |
/// |-----------------|-----------------------------------|
/// | up to 1,000     | `user_batch_size`                 |
/// | up to 10,000    | `min(250, user_batch_size)`       |
/// | up to 50,000    | `min(500, user_large_batch_size)` |
/// | above 50,000    | `user_large_batch_size`           |
///
/// The result is never below 1.
pub fn plan_batch_size(
    url_count: usize,
    user_batch_size: usize,
    user_large_batch_size: usize,
) -> usize {
    let size = if url_count <= SMALL_LIST_MAX {
        user_batch_size
    } else if url_count <= MEDIUM_LIST_MAX {
        user_batch_size.min(MEDIUM_LIST_BATCH_CAP)
    } else if url_count <= LARGE_LIST_MAX {
        user_large_batch_size.min(LARGE_LIST_BATCH_CAP)
    } else {
        user_large_batch_size
    };
    size.max(1)
}

/// Upper-bound estimate of the run time in seconds: one timeout per batch.
pub fn estimate_processing_time_secs(url_count: usize, batch_size: usize, timeout_secs: u64) -> u64 {
    let batches = url_count.div_ceil(batch_size.max(1)) as u64;
    batches.saturating_mul(timeout_secs)
}

/// Splits `items` into consecutive chunks of at most `batch_size`, keeping
/// their order.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let size = batch_size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(size).collect());
    }
    batches
}
