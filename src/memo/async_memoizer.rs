//! Async Memoizer Module
//!
//! Memoizes functions returning futures. The pending computation is cached
//! as soon as a call starts, so concurrent callers with the same key share it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, trace};

use crate::error::{MemoError, MemoResult};
use crate::memo::entry::ttl_to_ms;
use crate::memo::key::{default_key_fn, infallible_key_fn, KeyFn};
use crate::memo::{Clock, MemoEntry, MemoStats, SystemClock};

type Pending<V> = Arc<OnceCell<V>>;

// == Async Memoizer ==
/// Memoizer for async functions.
///
/// A failed computation leaves its slot empty. The error goes to the caller
/// whose attempt failed; every other caller awaiting the slot then runs its
/// own attempt in turn, and the next call for the key starts a new one. Each
/// attempt counts as a miss and each call served without running the function
/// as a hit. There is no timeout or cancellation for a computation in flight.
pub struct AsyncMemoizer<A, V, F> {
    compute: F,
    key_fn: KeyFn<A>,
    ttl_ms: Option<u64>,
    clock: Arc<dyn Clock>,
    slots: Mutex<AsyncSlots<V>>,
}

struct AsyncSlots<V> {
    entries: HashMap<String, MemoEntry<Pending<V>>>,
    stats: MemoStats,
}

impl<A, V, F> AsyncMemoizer<A, V, F> {
    // == Constructors ==
    /// Memoizes `compute`, keyed by the serialized arguments.
    pub fn new(compute: F) -> Self
    where
        A: Serialize + 'static,
    {
        Self::from_parts(compute, default_key_fn())
    }

    /// Memoizes `compute`, keyed by `key_fn`.
    pub fn with_key<K>(compute: F, key_fn: K) -> Self
    where
        A: 'static,
        K: Fn(&A) -> String + Send + Sync + 'static,
    {
        Self::from_parts(compute, infallible_key_fn(key_fn))
    }

    fn from_parts(compute: F, key_fn: KeyFn<A>) -> Self {
        Self {
            compute,
            key_fn,
            ttl_ms: None,
            clock: Arc::new(SystemClock),
            slots: Mutex::new(AsyncSlots {
                entries: HashMap::new(),
                stats: MemoStats::new(),
            }),
        }
    }

    /// Entries older than `ttl` are recomputed. A zero TTL disables expiry;
    /// anything shorter than a millisecond is rounded up to one.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = Some(ttl_to_ms(ttl)).filter(|ttl| *ttl > 0);
        self
    }

    /// Sets the time source used for TTL checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms.map(Duration::from_millis)
    }

    /// Returns hit/miss counters. A call counts once it completes: as a miss
    /// if it ran the function, as a hit otherwise.
    pub async fn stats(&self) -> MemoStats {
        let slots = self.slots.lock().await;
        let mut stats = slots.stats.clone();
        stats.set_total_entries(slots.entries.len());
        stats
    }

    /// Forgets every cached result and computation in flight.
    pub async fn clear(&self) {
        self.slots.lock().await.entries.clear();
    }
}

impl<A, V: Clone, F> AsyncMemoizer<A, V, F> {
    // == Call ==
    /// Calls the memoized function, joining any computation already running
    /// for the same key.
    ///
    /// # Errors
    /// - [`MemoError::KeyDerivation`] if the key cannot be derived.
    /// - [`MemoError::Computation`] if the computation this call ran failed.
    pub async fn call<E, Fut>(&self, args: A) -> MemoResult<V, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = (self.key_fn)(&args).map_err(MemoError::KeyDerivation)?;
        trace!(key = %key, "derived memo key");

        let slot = self.slot_for(&key).await;
        let mut ran = false;
        let outcome = slot
            .get_or_try_init(|| {
                ran = true;
                (self.compute)(args)
            })
            .await
            .map(Clone::clone);

        let mut slots = self.slots.lock().await;
        if ran {
            slots.stats.record_miss();
            debug!(key = %key, ok = outcome.is_ok(), "memo computed");
        } else {
            slots.stats.record_hit();
            debug!(key = %key, "memo hit");
        }
        outcome.map_err(MemoError::Computation)
    }

    async fn slot_for(&self, key: &str) -> Pending<V> {
        let now_ms = self.clock.now_ms();
        let mut slots = self.slots.lock().await;

        let existing = slots
            .entries
            .get(key)
            .map(|entry| (entry.is_fresh(now_ms, self.ttl_ms), Arc::clone(&entry.value)));

        match existing {
            Some((true, slot)) => {
                trace!(key = %key, resolved = slot.initialized(), "memo slot found");
                return slot;
            }
            Some((false, _)) => {
                slots.stats.record_expired();
                debug!(key = %key, "memo entry expired, recomputing");
            }
            None => debug!(key = %key, "memo miss"),
        }

        let slot: Pending<V> = Arc::new(OnceCell::new());
        let entry = match self.ttl_ms {
            Some(_) => MemoEntry::stamped(Arc::clone(&slot), now_ms),
            None => MemoEntry::permanent(Arc::clone(&slot)),
        };
        slots.entries.insert(key.to_string(), entry);
        slot
    }
}
