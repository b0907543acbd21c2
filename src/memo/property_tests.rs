//! Property-Based Tests for the Memo Module
//!
//! Uses proptest to check cache correctness against a reference model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::memo::{ManualClock, MemoStore, MemoizerBuilder};

// == Strategies ==
/// Small argument space so keys repeat often
fn arg_strategy() -> impl Strategy<Value = (u8, String)> {
    (0u8..8, "[a-c]{1,2}")
}

#[derive(Debug, Clone)]
enum MemoOp {
    Call { args: (u8, String) },
    Advance { ms: u16 },
}

fn memo_op_strategy() -> impl Strategy<Value = MemoOp> {
    prop_oneof![
        3 => arg_strategy().prop_map(|args| MemoOp::Call { args }),
        1 => (0u16..200).prop_map(|ms| MemoOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of calls without a TTL, the wrapped function runs
    // exactly once per distinct argument value and every call returns the
    // first result computed for its arguments.
    #[test]
    fn prop_no_ttl_computes_once_per_key(calls in prop::collection::vec(arg_strategy(), 1..60)) {
        let counter = Arc::new(AtomicU64::new(0));
        let runs = Arc::clone(&counter);
        let memo = MemoizerBuilder::new(move |_: &(u8, String)| {
            Ok::<_, Infallible>(runs.fetch_add(1, Ordering::SeqCst))
        })
        .build();

        let mut first_results: HashMap<(u8, String), u64> = HashMap::new();
        for args in calls {
            let result = memo.call(&args).unwrap();
            let expected = *first_results.entry(args).or_insert(result);
            prop_assert_eq!(result, expected, "Cached value changed without a TTL");
        }

        prop_assert_eq!(counter.load(Ordering::SeqCst), first_results.len() as u64);
        prop_assert_eq!(memo.len(), first_results.len());

        let stats = memo.stats();
        prop_assert_eq!(stats.misses, first_results.len() as u64);
        prop_assert_eq!(stats.expired, 0);
    }

    // With a TTL, a call recomputes exactly when its key is absent or the
    // stored entry is at least `ttl` old; otherwise it returns the stored value.
    #[test]
    fn prop_ttl_matches_reference_model(
        ttl in 1u64..150,
        ops in prop::collection::vec(memo_op_strategy(), 1..80)
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let counter = Arc::new(AtomicU64::new(0));
        let runs = Arc::clone(&counter);
        let memo = MemoizerBuilder::new(move |_: &(u8, String)| {
            Ok::<_, Infallible>(runs.fetch_add(1, Ordering::SeqCst))
        })
        .ttl_ms(ttl)
        .clock(clock.clone())
        .build();

        // key -> (value, stored_at)
        let mut model: HashMap<(u8, String), (u64, i64)> = HashMap::new();
        let mut now: i64 = 0;
        let mut expected_runs = 0u64;

        for op in ops {
            match op {
                MemoOp::Advance { ms } => {
                    now += i64::from(ms);
                    clock.set(now);
                }
                MemoOp::Call { args } => {
                    let result = memo.call(&args).unwrap();
                    match model.get(&args) {
                        Some((value, stored_at)) if now - stored_at < ttl as i64 => {
                            prop_assert_eq!(result, *value, "Fresh entry should be served");
                        }
                        _ => {
                            prop_assert_eq!(result, expected_runs, "Miss should run the function");
                            expected_runs += 1;
                            model.insert(args, (result, now));
                        }
                    }
                }
            }
        }

        prop_assert_eq!(counter.load(Ordering::SeqCst), expected_runs);
        prop_assert_eq!(memo.len(), model.len(), "Stale entries are overwritten, not duplicated");
    }

    // Storing a value twice under one key keeps a single entry holding the
    // latest value.
    #[test]
    fn prop_store_overwrite_semantics(key in "[a-z]{1,8}", first in any::<i32>(), second in any::<i32>()) {
        let mut store = MemoStore::new(None);

        store.store(key.clone(), first, 0);
        store.store(key.clone(), second, 0);

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.peek(&key).map(|entry| entry.value), Some(second));
    }
}
