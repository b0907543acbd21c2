//! Memo Store Module
//!
//! Per-wrapper key/value storage with lazy TTL checks. Stale entries stay in
//! place until the recomputed value overwrites them.

use std::collections::HashMap;

use crate::memo::{MemoEntry, MemoStats};

// == Lookup ==
/// Outcome of looking a key up in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Present and fresh
    Hit(V),
    /// Present but past its TTL
    Stale,
    /// Never stored
    Absent,
}

// == Memo Store ==
/// Cache owned by a single memoized function.
#[derive(Debug)]
pub struct MemoStore<V> {
    /// Key-value storage
    entries: HashMap<String, MemoEntry<V>>,
    /// Expiry window in milliseconds, None = entries never expire
    ttl_ms: Option<u64>,
    /// Lookup statistics
    stats: MemoStats,
}

impl<V: Clone> MemoStore<V> {
    // == Constructor ==
    /// Creates an empty store. A TTL of zero means entries never expire.
    pub fn new(ttl_ms: Option<u64>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: ttl_ms.filter(|ttl| *ttl > 0),
            stats: MemoStats::new(),
        }
    }

    /// The effective TTL in milliseconds.
    pub fn ttl_ms(&self) -> Option<u64> {
        self.ttl_ms
    }

    // == Lookup ==
    /// Looks up a key and records a hit or miss.
    ///
    /// A stale entry is reported as [`Lookup::Stale`] but left in the store.
    pub fn lookup(&mut self, key: &str, now_ms: i64) -> Lookup<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now_ms, self.ttl_ms) => {
                self.stats.record_hit();
                Lookup::Hit(entry.value.clone())
            }
            Some(_) => {
                self.stats.record_miss();
                self.stats.record_expired();
                Lookup::Stale
            }
            None => {
                self.stats.record_miss();
                Lookup::Absent
            }
        }
    }

    /// Counts a call that was served by another caller's computation.
    pub fn record_joined(&mut self) {
        self.stats.record_hit();
    }

    // == Store ==
    /// Stores a value under `key`, overwriting any prior entry.
    ///
    /// The entry is stamped with `now_ms` only when a TTL is configured.
    pub fn store(&mut self, key: String, value: V, now_ms: i64) {
        let entry = match self.ttl_ms {
            Some(_) => MemoEntry::stamped(value, now_ms),
            None => MemoEntry::permanent(value),
        };
        self.entries.insert(key, entry);
    }

    // == Peek ==
    /// Returns the raw entry for a key, fresh or not, without touching stats.
    pub fn peek(&self, key: &str) -> Option<&MemoEntry<V>> {
        self.entries.get(key)
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> MemoStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Clear ==
    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
