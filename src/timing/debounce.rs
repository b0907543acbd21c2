//! Debounce Module
//!
//! Delays a callback until calls stop arriving for a quiet period.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

// == Debouncer ==
/// Runs a callback once a burst of triggers has gone quiet for `wait`.
///
/// Each trigger cancels the pending invocation and schedules a new one with
/// its own argument, so only the last trigger of a burst reaches the
/// callback. Must be triggered from within a tokio runtime.
pub struct Debouncer<T> {
    wait: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    // == Trigger ==
    /// Schedules `callback(arg)` after the quiet period, replacing any
    /// invocation still waiting.
    pub fn trigger(&self, arg: T) {
        let callback = Arc::clone(&self.callback);
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(arg);
        });

        if let Some(previous) = self.lock_pending().replace(handle) {
            if !previous.is_finished() {
                debug!("debounce: superseding pending call");
            }
            previous.abort();
        }
    }

    // == Cancel ==
    /// Drops the pending invocation. Returns true if one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// True while an invocation is scheduled but has not run yet.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
