//! Timing Module
//!
//! Wrappers that control when, or how often, a function runs.
//!
//! # Wrappers
//! - `delay`: run once after a wait
//! - `Debouncer`: run after triggers go quiet
//! - `Throttler`: run at most once per interval
//! - `Once`: run on the first call only

mod debounce;
mod delay;
mod once;
mod throttle;

pub use debounce::Debouncer;
pub use delay::delay;
pub use once::{once, Once};
pub use throttle::Throttler;
