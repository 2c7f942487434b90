//! Configuration constants and defaults for lobbylock.

use std::time::Duration;

/// Maximum hold duration applied when a caller does not pass one.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Interval of the background sweep armed on first acquisition.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(60_000);

// Default value functions for serde
pub(crate) fn default_sweep_interval_ms() -> u64 {
    DEFAULT_SWEEP_INTERVAL.as_millis() as u64
}
pub(crate) fn default_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT.as_millis() as u64
}
