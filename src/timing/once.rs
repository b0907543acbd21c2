//! Run-once wrapper.

use std::sync::OnceLock;

// == Once ==
/// Runs the wrapped function on the first call only.
///
/// Later calls ignore their argument and return the first call's result.
pub struct Once<F, R> {
    func: F,
    result: OnceLock<R>,
}

impl<F, R> Once<F, R> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            result: OnceLock::new(),
        }
    }

    pub fn call<A>(&self, arg: A) -> &R
    where
        F: Fn(A) -> R,
    {
        self.result.get_or_init(|| (self.func)(arg))
    }

    pub fn has_run(&self) -> bool {
        self.result.get().is_some()
    }

    /// The stored result, if the function has run.
    pub fn get(&self) -> Option<&R> {
        self.result.get()
    }
}

/// Wraps `func` in a [`Once`].
pub fn once<F, R>(func: F) -> Once<F, R> {
    Once::new(func)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_runs_only_once() {
        let calls = AtomicU32::new(0);
        let init = once(|x: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * 10
        });

        assert!(!init.has_run());
        assert_eq!(*init.call(1), 10);
        assert_eq!(*init.call(2), 10);
        assert_eq!(init.get(), Some(&10));
        assert!(init.has_run());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_once_across_threads() {
        let calls = AtomicU32::new(0);
        let init = once(|_: ()| calls.fetch_add(1, Ordering::SeqCst));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    init.call(());
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
