//! Memo Statistics Module
//!
//! Tracks hits, misses and stale lookups for a single memoized function.

use serde::Serialize;

// == Memo Stats ==
/// Counters for one memoizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    /// Calls answered from the cache
    pub hits: u64,
    /// Calls that ran the wrapped function (absent or stale key)
    pub misses: u64,
    /// Subset of misses caused by a stale entry
    pub expired: u64,
    /// Current number of entries, stale ones included
    pub total_entries: usize,
}

impl MemoStats {
    // == Constructor ==
    /// Creates a new MemoStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no calls have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a stale lookup; the caller records the miss separately.
    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
