//! Delayed invocation.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Runs `f` once after `wait` on the tokio runtime.
///
/// The returned handle yields `f`'s result and can be aborted to cancel the
/// call before it fires.
///
/// # Example
/// ```ignore
/// let handle = delay(Duration::from_millis(50), || "done");
/// assert_eq!(handle.await.unwrap(), "done");
/// ```
pub fn delay<F, T>(wait: Duration, f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(wait).await;
        debug!(wait_ms = wait.as_millis() as u64, "delayed call firing");
        f()
    })
}
