//! Memoizer Module
//!
//! Wraps a function so repeated calls with the same key reuse the first
//! result, optionally only for a limited time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{MemoError, MemoResult};
use crate::memo::entry::ttl_to_ms;
use crate::memo::flight::Flight;
use crate::memo::key::{default_key_fn, infallible_key_fn, KeyFn};
use crate::memo::{Clock, Lookup, MemoStats, MemoStore, SystemClock};

type ComputeFn<C, A, V, E> = Box<dyn Fn(&C, &A) -> Result<V, E> + Send + Sync>;

// == Memoizer ==
/// A memoized function.
///
/// `A` is the argument value (use a tuple for several arguments), `V` the
/// cached result, `E` the wrapped function's error and `C` an optional
/// receiver passed through to the function on every call. The receiver is not
/// part of the cache key.
///
/// Each memoizer owns its cache; it is dropped together with the memoizer.
/// No lock is held while the function runs, so it may call back into its own
/// memoizer for other keys (recursive memoization). Callers asking for a key
/// that is being computed wait for that computation instead of running the
/// function themselves. If it fails, each waiter runs its own attempt, and
/// every attempt counts as a miss.
pub struct Memoizer<A, V, E, C = ()> {
    compute: ComputeFn<C, A, V, E>,
    key_fn: KeyFn<A>,
    clock: Arc<dyn Clock>,
    state: Mutex<MemoState<V>>,
}

struct MemoState<V> {
    store: MemoStore<V>,
    in_flight: HashMap<String, Arc<Flight<V>>>,
}

enum Claim<V> {
    Cached(V),
    Join(Arc<Flight<V>>),
    Lead(Arc<Flight<V>>),
}

impl<A, V: Clone, E, C> Memoizer<A, V, E, C> {
    // == Call With ==
    /// Calls the memoized function with an explicit receiver.
    ///
    /// # Errors
    /// - [`MemoError::KeyDerivation`] if the key cannot be derived; the cache
    ///   is not consulted.
    /// - [`MemoError::Computation`] with the function's own error on a miss;
    ///   nothing is stored and the next call retries.
    pub fn call_with(&self, ctx: &C, args: &A) -> MemoResult<V, E> {
        let key = (self.key_fn)(args).map_err(MemoError::KeyDerivation)?;
        trace!(key = %key, "derived memo key");

        loop {
            match self.claim(&key) {
                Claim::Cached(value) => return Ok(value),
                Claim::Join(flight) => match flight.wait() {
                    Some(value) => {
                        self.lock_state().store.record_joined();
                        debug!(key = %key, "joined computation in flight");
                        return Ok(value);
                    }
                    None => debug!(key = %key, "joined computation failed, retrying"),
                },
                Claim::Lead(flight) => return self.lead(ctx, args, key, flight),
            }
        }
    }

    /// Serves the key from the store, joins a running computation, or
    /// registers this caller as the one computing it.
    fn claim(&self, key: &str) -> Claim<V> {
        let mut state = self.lock_state();
        if let Some(flight) = state.in_flight.get(key) {
            return Claim::Join(Arc::clone(flight));
        }

        match state.store.lookup(key, self.clock.now_ms()) {
            Lookup::Hit(value) => {
                debug!(key = %key, "memo hit");
                return Claim::Cached(value);
            }
            Lookup::Stale => debug!(key = %key, "memo entry expired, recomputing"),
            Lookup::Absent => debug!(key = %key, "memo miss"),
        }

        let flight = Arc::new(Flight::new());
        state.in_flight.insert(key.to_string(), Arc::clone(&flight));
        Claim::Lead(flight)
    }

    fn lead(&self, ctx: &C, args: &A, key: String, flight: Arc<Flight<V>>) -> MemoResult<V, E> {
        let pending = Pending {
            state: &self.state,
            clock: &*self.clock,
            key,
            flight,
            settled: false,
        };

        match (self.compute)(ctx, args) {
            Ok(value) => {
                pending.settle(Some(&value));
                Ok(value)
            }
            Err(err) => {
                pending.settle(None);
                Err(MemoError::Computation(err))
            }
        }
    }

    // == Stats ==
    /// Returns hit/miss counters for this memoizer.
    pub fn stats(&self) -> MemoStats {
        self.lock_state().store.stats()
    }

    /// Configured TTL, None if entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        self.lock_state().store.ttl_ms().map(Duration::from_millis)
    }

    /// Number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock_state().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().store.is_empty()
    }

    /// Forgets every cached result. Computations in flight still deliver to
    /// their waiters and store their value.
    pub fn clear(&self) {
        self.lock_state().store.clear();
    }

    fn lock_state(&self) -> MutexGuard<'_, MemoState<V>> {
        lock(&self.state)
    }
}

// The function never runs under this lock, so a poisoned guard still holds a
// consistent store.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Pending ==
/// The leading caller's claim on a key.
///
/// Settling stores a successful value, drops the in-flight marker and wakes
/// the waiters. If the function panics the claim settles as failed on drop,
/// so waiters retry instead of blocking forever.
struct Pending<'a, V: Clone> {
    state: &'a Mutex<MemoState<V>>,
    clock: &'a dyn Clock,
    key: String,
    flight: Arc<Flight<V>>,
    settled: bool,
}

impl<V: Clone> Pending<'_, V> {
    fn settle(mut self, value: Option<&V>) {
        self.finish(value);
    }

    fn finish(&mut self, value: Option<&V>) {
        self.settled = true;
        {
            let mut state = lock(self.state);
            if let Some(value) = value {
                let now_ms = self.clock.now_ms();
                state.store.store(self.key.clone(), value.clone(), now_ms);
            }
            state.in_flight.remove(&self.key);
        }
        self.flight.land(value.cloned());
    }
}

impl<V: Clone> Drop for Pending<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(key = %self.key, "memoized function panicked");
            self.finish(None);
        }
    }
}

impl<A, V: Clone, E> Memoizer<A, V, E, ()> {
    // == Call ==
    /// Calls the memoized function.
    pub fn call(&self, args: &A) -> MemoResult<V, E> {
        self.call_with(&(), args)
    }

    /// Turns the memoizer into a plain closure.
    pub fn into_fn(self) -> impl Fn(&A) -> MemoResult<V, E> {
        move |args: &A| self.call(args)
    }
}

// == Builder ==
/// Configures a [`Memoizer`].
pub struct MemoizerBuilder<A, V, E, C = ()> {
    compute: ComputeFn<C, A, V, E>,
    key_fn: KeyFn<A>,
    ttl_ms: Option<u64>,
    clock: Arc<dyn Clock>,
}

impl<A: 'static, V, E> MemoizerBuilder<A, V, E, ()> {
    /// Memoizes `func`, keyed by the serialized arguments.
    pub fn new<F>(func: F) -> Self
    where
        A: Serialize,
        F: Fn(&A) -> Result<V, E> + Send + Sync + 'static,
    {
        Self::from_parts(Box::new(move |_: &(), args: &A| func(args)), default_key_fn())
    }

    /// Memoizes `func`, keyed by `key_fn`.
    pub fn keyed<F, K>(func: F, key_fn: K) -> Self
    where
        F: Fn(&A) -> Result<V, E> + Send + Sync + 'static,
        K: Fn(&A) -> String + Send + Sync + 'static,
    {
        Self::from_parts(
            Box::new(move |_: &(), args: &A| func(args)),
            infallible_key_fn(key_fn),
        )
    }
}

impl<A: 'static, V, E, C> MemoizerBuilder<A, V, E, C> {
    /// Memoizes a function that also receives the caller's receiver.
    pub fn bound<F>(func: F) -> Self
    where
        A: Serialize,
        F: Fn(&C, &A) -> Result<V, E> + Send + Sync + 'static,
    {
        Self::from_parts(Box::new(func), default_key_fn())
    }

    fn from_parts(compute: ComputeFn<C, A, V, E>, key_fn: KeyFn<A>) -> Self {
        Self {
            compute,
            key_fn,
            ttl_ms: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the key function.
    pub fn key_fn<K>(self, key_fn: K) -> Self
    where
        K: Fn(&A) -> String + Send + Sync + 'static,
    {
        Self {
            key_fn: infallible_key_fn(key_fn),
            ..self
        }
    }

    /// Replaces the key function with one that may fail.
    pub fn try_key_fn<K>(self, key_fn: K) -> Self
    where
        K: Fn(&A) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            key_fn: Box::new(key_fn),
            ..self
        }
    }

    /// Entries older than `ttl` are recomputed. A zero TTL disables expiry;
    /// anything shorter than a millisecond is rounded up to one.
    pub fn ttl(self, ttl: Duration) -> Self {
        self.ttl_ms(ttl_to_ms(ttl))
    }

    pub fn ttl_ms(self, ttl_ms: u64) -> Self {
        Self {
            ttl_ms: Some(ttl_ms),
            ..self
        }
    }

    /// Sets the time source used for TTL checks.
    pub fn clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    pub fn build(self) -> Memoizer<A, V, E, C>
    where
        V: Clone,
    {
        Memoizer {
            compute: self.compute,
            key_fn: self.key_fn,
            clock: self.clock,
            state: Mutex::new(MemoState {
                store: MemoStore::new(self.ttl_ms),
                in_flight: HashMap::new(),
            }),
        }
    }
}

// == Constructors ==
/// Memoizes `func` with serialized-argument keys and no expiry.
pub fn memoize<A, V, E, F>(func: F) -> Memoizer<A, V, E>
where
    A: Serialize + 'static,
    V: Clone,
    F: Fn(&A) -> Result<V, E> + Send + Sync + 'static,
{
    MemoizerBuilder::new(func).build()
}

/// Memoizes `func` with a caller-supplied key function and no expiry.
pub fn memoize_with_key<A, V, E, F, K>(func: F, key_fn: K) -> Memoizer<A, V, E>
where
    A: 'static,
    V: Clone,
    F: Fn(&A) -> Result<V, E> + Send + Sync + 'static,
    K: Fn(&A) -> String + Send + Sync + 'static,
{
    MemoizerBuilder::keyed(func, key_fn).build()
}
