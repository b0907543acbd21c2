//! Throttle Module
//!
//! Limits a function to at most one run per interval.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

// == Throttler ==
/// Runs the wrapped function immediately unless it already ran within the
/// last `interval`; calls inside the window are dropped.
///
/// Time is read from `tokio::time::Instant`, so a paused test runtime
/// controls the window.
pub struct Throttler<F> {
    interval: Duration,
    func: F,
    last_run: Mutex<Option<Instant>>,
}

impl<F> Throttler<F> {
    pub fn new(interval: Duration, func: F) -> Self {
        Self {
            interval,
            func,
            last_run: Mutex::new(None),
        }
    }

    // == Call ==
    /// Runs `func(arg)` and returns its result, or returns None if the call
    /// falls inside the current window.
    pub fn call<A, R>(&self, arg: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        let now = Instant::now();
        {
            let mut last_run = self.last_run.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = *last_run {
                if now.duration_since(previous) < self.interval {
                    trace!("throttle: call dropped");
                    return None;
                }
            }
            *last_run = Some(now);
        }
        Some((self.func)(arg))
    }

    /// Reopens the window so the next call runs immediately.
    pub fn reset(&self) {
        *self.last_run.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
