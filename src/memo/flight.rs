//! In-flight Computation Module
//!
//! A computation one caller is running for a key. Other callers asking for
//! the same key block on it instead of running the function again.

use std::sync::{Condvar, Mutex, PoisonError};

enum Landing<V> {
    Running,
    Landed(V),
    Failed,
}

// == Flight ==
/// Outcome slot for a computation in progress.
pub(crate) struct Flight<V> {
    state: Mutex<Landing<V>>,
    settled: Condvar,
}

impl<V: Clone> Flight<V> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(Landing::Running),
            settled: Condvar::new(),
        }
    }

    // == Wait ==
    /// Blocks until the computation finishes.
    ///
    /// # Returns
    /// - `Some(value)` if it succeeded
    /// - `None` if it failed or panicked; the caller has to run its own attempt
    pub(crate) fn wait(&self) -> Option<V> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = self
            .settled
            .wait_while(state, |state| matches!(state, Landing::Running))
            .unwrap_or_else(PoisonError::into_inner);
        match &*state {
            Landing::Landed(value) => Some(value.clone()),
            _ => None,
        }
    }

    // == Land ==
    /// Publishes the outcome and wakes every waiter.
    pub(crate) fn land(&self, value: Option<V>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = match value {
            Some(value) => Landing::Landed(value),
            None => Landing::Failed,
        };
        self.settled.notify_all();
    }
}
