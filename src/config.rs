//! Configuration Module
//!
//! Loads default timings for memoizers and timing wrappers from environment
//! variables.

use std::env;
use std::time::Duration;

/// Default timing parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Memo TTL in milliseconds, 0 = entries never expire
    pub default_ttl_ms: u64,
    /// Quiet period for debounced callbacks in milliseconds
    pub debounce_wait_ms: u64,
    /// Window for throttled calls in milliseconds
    pub throttle_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_DEFAULT_TTL_MS` - Memo TTL in ms (default: 0, never expire)
    /// - `DEBOUNCE_WAIT_MS` - Debounce quiet period in ms (default: 100)
    /// - `THROTTLE_INTERVAL_MS` - Throttle window in ms (default: 100)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_ms: env_u64("MEMO_DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            debounce_wait_ms: env_u64("DEBOUNCE_WAIT_MS").unwrap_or(defaults.debounce_wait_ms),
            throttle_interval_ms: env_u64("THROTTLE_INTERVAL_MS")
                .unwrap_or(defaults.throttle_interval_ms),
        }
    }

    /// The memo TTL, None when entries should never expire.
    pub fn default_ttl(&self) -> Option<Duration> {
        Some(self.default_ttl_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_wait_ms)
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: 0,
            debounce_wait_ms: 100,
            throttle_interval_ms: 100,
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
