//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a lock registry.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds between background sweeps of stale locks (0 disables).
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// Hold duration in milliseconds used when a caller does not pass one.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
}

impl Config {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval_ms: default_sweep_interval_ms(),
            default_timeout_ms: default_timeout_ms(),
        }
    }
}
