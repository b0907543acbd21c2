//! Memo Entry Module
//!
//! Defines a single cached result and its freshness check.

use std::time::Duration;

// == Memo Entry ==
/// A cached result, stamped with its store time when a TTL is in force.
#[derive(Debug, Clone)]
pub struct MemoEntry<V> {
    /// The cached value
    pub value: V,
    /// Store timestamp (Unix milliseconds), None = entry never expires
    pub stored_at: Option<i64>,
}

impl<V> MemoEntry<V> {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn permanent(value: V) -> Self {
        Self {
            value,
            stored_at: None,
        }
    }

    /// Creates an entry stamped with `now_ms`.
    pub fn stamped(value: V, now_ms: i64) -> Self {
        Self {
            value,
            stored_at: Some(now_ms),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale. The age
    /// is not clamped, so a reading earlier than `stored_at` counts as fresh.
    ///
    /// # Returns
    /// - `true` if no TTL applies, the entry is unstamped, or `now - stored_at < ttl`
    /// - `false` once `now - stored_at >= ttl`
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: Option<u64>) -> bool {
        match (self.stored_at, ttl_ms) {
            (Some(stored_at), Some(ttl)) => {
                let age = i128::from(now_ms) - i128::from(stored_at);
                age < i128::from(ttl)
            }
            _ => true,
        }
    }
}

// == TTL Conversion ==
/// Converts a TTL to whole milliseconds.
///
/// A nonzero duration shorter than a millisecond rounds up to 1 ms so it still
/// expires; only `Duration::ZERO` maps to 0 (no expiry).
pub(crate) fn ttl_to_ms(ttl: Duration) -> u64 {
    if ttl.is_zero() {
        return 0;
    }
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}
