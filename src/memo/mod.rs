//! Memo Module
//!
//! Memoization with optional TTL expiry. Each memoized function owns its own
//! cache; stale entries are recomputed lazily, never swept.

mod async_memoizer;
mod clock;
mod entry;
mod flight;
pub mod key;
mod memoizer;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use async_memoizer::AsyncMemoizer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::MemoEntry;
pub use memoizer::{memoize, memoize_with_key, Memoizer, MemoizerBuilder};
pub use stats::MemoStats;
pub use store::{Lookup, MemoStore};
