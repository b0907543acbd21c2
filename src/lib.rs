//! memokit - memoization and small functional helpers
//!
//! Provides a memoizer with optional TTL expiry, plus timing wrappers,
//! function combinators and data-shaping helpers.

pub mod compose;
pub mod config;
pub mod error;
pub mod memo;
pub mod shape;
pub mod timing;

pub use config::Config;
pub use error::{MemoError, MemoResult, ShapeError};
pub use memo::{memoize, memoize_with_key, AsyncMemoizer, Memoizer, MemoizerBuilder};
