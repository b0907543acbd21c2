//! memokit demo
//!
//! Walks through the memoizer, timing wrappers, combinators and shape
//! helpers, logging what happens along the way.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memokit::memo::MemoizerBuilder;
use memokit::shape::{group_n, omit_value, pick_value, zip};
use memokit::timing::{delay, once, Debouncer, Throttler};
use memokit::{compose, curry2, partial, pipe, AsyncMemoizer, Config};

/// Entry point for the memokit demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Exercise each module and log the results
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memokit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl_ms={}, debounce_wait_ms={}, throttle_interval_ms={}",
        config.default_ttl_ms, config.debounce_wait_ms, config.throttle_interval_ms
    );

    memo_demo(&config).await?;
    timing_demo(&config).await?;
    combinator_demo();
    shape_demo()?;

    info!("Demo complete");
    Ok(())
}

async fn memo_demo(config: &Config) -> anyhow::Result<()> {
    let runs = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&runs);
    let mut builder = MemoizerBuilder::new(move |(base, exp): &(u64, u32)| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Infallible>(base.pow(*exp))
    });
    if let Some(ttl) = config.default_ttl() {
        builder = builder.ttl(ttl);
    }
    let power = builder.build();

    for args in [(2, 10), (3, 4), (2, 10), (3, 4), (2, 10)] {
        let value = power.call(&args)?;
        info!("power{:?} = {}", args, value);
    }
    info!(
        "Memoizer ran {} times, stats: {}",
        runs.load(Ordering::SeqCst),
        serde_json::to_string(&power.stats())?
    );

    let fetch = AsyncMemoizer::new(|id: u32| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<_, Infallible>(format!("record-{id}"))
    });
    let (first, second) = tokio::join!(fetch.call(1), fetch.call(1));
    info!("Async memo results: {} / {}", first?, second?);
    info!("Async stats: {}", serde_json::to_string(&fetch.stats().await)?);

    Ok(())
}

async fn timing_demo(config: &Config) -> anyhow::Result<()> {
    let debouncer = Debouncer::new(config.debounce_wait(), |query: &'static str| {
        info!("Debounced search for {:?}", query);
    });
    for query in ["m", "me", "mem", "memo"] {
        debouncer.trigger(query);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let throttler = Throttler::new(config.throttle_interval(), |n: u32| n);
    let accepted: Vec<u32> = (0..5).filter_map(|n| throttler.call(n)).collect();
    info!("Throttled calls accepted: {:?}", accepted);

    let setup = once(|name: &str| format!("initialized {name}"));
    info!("{} / {}", setup.call("first"), setup.call("second"));

    let done = delay(config.debounce_wait() * 2, || "delayed call finished").await?;
    info!("{}", done);
    Ok(())
}

fn combinator_demo() {
    let double = |x: i32| x * 2;
    let add_one = |x: i32| x + 1;
    let add = curry2!(|a: i32, b: i32| a + b);
    let clamp = |value: i32, low: i32, high: i32| value.clamp(low, high);
    let clamp_to_100 = partial!(clamp, __, 0, 100);

    info!("pipe!(5, double, add_one) = {}", pipe!(5, double, add_one));
    info!("compose!(double, add_one)(5) = {}", compose!(double, add_one)(5));
    info!("curry2!(add)(40)(2) = {}", add(40)(2));
    info!("partial!(clamp, __, 0, 100)(250) = {}", clamp_to_100(250));
}

fn shape_demo() -> anyhow::Result<()> {
    let user = json!({"id": 7, "name": "Ada", "password": "hunter2"});
    info!("pick: {}", pick_value(&user, &["id", "name"])?);
    info!("omit: {}", omit_value(&user, &["password"])?);
    info!("zip: {:?}", zip(vec![1, 2, 3], vec!["a", "b"]));
    info!("group_n: {:?}", group_n(&[1, 2, 3, 4, 5, 6, 7], 3)?);
    Ok(())
}
