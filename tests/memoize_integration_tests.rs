//! Integration Tests for the public memoization API
//!
//! Exercises memoizers end to end through the crate's public surface.

use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use memokit::memo::{Clock, ManualClock, MemoStats};
use memokit::{memoize, memoize_with_key, AsyncMemoizer, MemoError, Memoizer, MemoizerBuilder};

// == Helper Functions ==

/// A function that returns how many times it has been called.
fn counter() -> (Arc<AtomicU32>, impl Fn(&(i32,)) -> Result<u32, Infallible> + Send + Sync) {
    let calls = Arc::new(AtomicU32::new(0));
    let inner = Arc::clone(&calls);
    (calls, move |_: &(i32,)| Ok(inner.fetch_add(1, Ordering::SeqCst) + 1))
}

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(1_700_000_000_000))
}

// == Cache Hits ==

#[test]
fn test_hit_avoids_recomputation() {
    let (calls, f) = counter();
    let wrapper = memoize(f);

    let first = wrapper.call(&(1,)).unwrap();
    let second = wrapper.call(&(1,)).unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_distinct_keys_are_independent() {
    let (calls, f) = counter();
    let wrapper = memoize(f);

    let one = wrapper.call(&(1,)).unwrap();
    let two = wrapper.call(&(2,)).unwrap();

    assert_ne!(one, two);
    assert_eq!(wrapper.call(&(1,)).unwrap(), one);
    assert_eq!(wrapper.call(&(2,)).unwrap(), two);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// == TTL ==

#[test]
fn test_ttl_expiry_triggers_recomputation() {
    let (calls, f) = counter();
    let clock = manual_clock();
    let wrapper = MemoizerBuilder::new(f)
        .ttl(Duration::from_millis(100))
        .clock(clock.clone())
        .build();

    assert_eq!(wrapper.call(&(1,)).unwrap(), 1);
    clock.advance(150);
    assert_eq!(wrapper.call(&(1,)).unwrap(), 2);
    assert_eq!(wrapper.call(&(1,)).unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_ttl_freshness_reuses_cache() {
    let (calls, f) = counter();
    let clock = manual_clock();
    let wrapper = MemoizerBuilder::new(f)
        .ttl(Duration::from_millis(100))
        .clock(clock.clone())
        .build();

    wrapper.call(&(1,)).unwrap();
    clock.advance(50);
    wrapper.call(&(1,)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stale_entry_counts_but_is_overwritten() {
    let (_, f) = counter();
    let clock = manual_clock();
    let wrapper = MemoizerBuilder::new(f)
        .ttl_ms(100)
        .clock(clock.clone())
        .build();

    wrapper.call(&(1,)).unwrap();
    clock.advance(100);
    wrapper.call(&(1,)).unwrap();

    assert_eq!(wrapper.len(), 1);
    assert_eq!(
        wrapper.stats(),
        MemoStats {
            hits: 0,
            misses: 2,
            expired: 1,
            total_entries: 1,
        }
    );
}

// == Key Functions ==

#[test]
fn test_custom_key_function_overrides_default() {
    let calls = Arc::new(AtomicU32::new(0));
    let inner = Arc::clone(&calls);
    let wrapper = memoize_with_key(
        move |(a, b): &(i32, String)| {
            inner.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(format!("{a}:{b}"))
        },
        |(a, _): &(i32, String)| a.to_string(),
    );

    assert_eq!(wrapper.call(&(1, "x".to_string())).unwrap(), "1:x");
    assert_eq!(wrapper.call(&(1, "y".to_string())).unwrap(), "1:x");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_default_key_distinguishes_argument_positions() {
    let (calls, _) = counter();
    let inner = Arc::clone(&calls);
    let wrapper = memoize(move |(a, b): &(String, String)| {
        inner.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Infallible>(format!("{a}{b}"))
    });

    // Same concatenation, different arguments
    assert_eq!(wrapper.call(&("ab".into(), "c".into())).unwrap(), "abc");
    assert_eq!(wrapper.call(&("a".into(), "bc".into())).unwrap(), "abc");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// == Failures ==

#[derive(Debug, PartialEq)]
struct Flaky(&'static str);

impl fmt::Display for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flaky: {}", self.0)
    }
}

#[test]
fn test_failure_is_not_cached() {
    let calls = Arc::new(AtomicU32::new(0));
    let inner = Arc::clone(&calls);
    let wrapper = memoize(move |k: &String| {
        if inner.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Flaky("first attempt"))
        } else {
            Ok(format!("value for {k}"))
        }
    });

    let err = wrapper.call(&"k".to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Computation failed: flaky: first attempt");
    assert!(matches!(err, MemoError::Computation(Flaky("first attempt"))));
    assert!(wrapper.is_empty());

    assert_eq!(wrapper.call(&"k".to_string()).unwrap(), "value for k");
    assert_eq!(wrapper.call(&"k".to_string()).unwrap(), "value for k");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_key_derivation_failure_propagates() {
    let (calls, f) = counter();
    let wrapper = MemoizerBuilder::new(f)
        .try_key_fn(|_: &(i32,)| Err(anyhow::anyhow!("no key for you")))
        .build();

    let err = wrapper.call(&(1,)).unwrap_err();
    assert!(err.is_key_derivation());
    assert_eq!(err.to_string(), "Key derivation failed: no key for you");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// == Receiver ==

struct Multiplier {
    factor: i64,
}

#[test]
fn test_receiver_reaches_function() {
    let wrapper = MemoizerBuilder::bound(|this: &Multiplier, x: &i64| {
        Ok::<_, Infallible>(this.factor * x)
    })
    .build();

    let by_three = Multiplier { factor: 3 };
    assert_eq!(wrapper.call_with(&by_three, &7).unwrap(), 21);
    assert_eq!(wrapper.call_with(&by_three, &7).unwrap(), 21);
    assert_eq!(wrapper.stats().hits, 1);
}

// == Recursion ==

static PATHS: OnceLock<Memoizer<(u32, u32), u64, Infallible>> = OnceLock::new();

/// Lattice paths through a grid, memoized on (row, col).
fn paths() -> &'static Memoizer<(u32, u32), u64, Infallible> {
    PATHS.get_or_init(|| {
        memoize(|&(row, col): &(u32, u32)| {
            if row == 0 || col == 0 {
                return Ok(1);
            }
            let up = paths().call(&(row - 1, col)).unwrap();
            let left = paths().call(&(row, col - 1)).unwrap();
            Ok(up + left)
        })
    })
}

#[test]
fn test_memoized_function_may_call_its_own_wrapper() {
    assert_eq!(paths().call(&(16, 16)).unwrap(), 601_080_390);
    // Each cell of the 17x17 grid except the unreachable (0, 0) is computed once
    assert_eq!(paths().stats().misses, 17 * 17 - 1);
}

// == Async ==

#[tokio::test(start_paused = true)]
async fn test_async_pending_computation_is_shared() {
    let calls = Arc::new(AtomicU32::new(0));
    let inner = Arc::clone(&calls);
    let clock = manual_clock();
    let wrapper = AsyncMemoizer::new(move |x: u64| {
        inner.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, Infallible>(x + 1)
        }
    })
    .with_ttl(Duration::from_millis(100))
    .with_clock(clock.clone());

    let (a, b) = tokio::join!(wrapper.call(1), wrapper.call(1));
    assert_eq!((a.unwrap(), b.unwrap()), (2, 2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    clock.advance(100);
    assert_eq!(wrapper.call(1).await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_clock_trait_object() {
    let clock: Arc<dyn Clock> = manual_clock();
    assert_eq!(clock.now_ms(), 1_700_000_000_000);
}
