//! Lock entry and snapshot types.

use crate::scheduler::TimerId;
use std::time::{Duration, Instant};

/// One active hold on a resource.
#[derive(Debug, Clone)]
pub(super) struct LockEntry {
    pub(super) acquired_at: Instant,
    pub(super) timeout: Duration,
    pub(super) generation: u64,
    pub(super) timer: TimerId,
}

impl LockEntry {
    pub(super) fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.acquired_at)
    }

    /// Held strictly longer than its own timeout.
    pub(super) fn is_stale(&self, now: Instant) -> bool {
        self.age(now) > self.timeout
    }
}

/// Information about an active lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    /// The locked resource (e.g., "game-42").
    pub resource_id: String,

    /// Time since acquisition.
    pub age: Duration,

    /// Maximum hold duration.
    pub timeout: Duration,

    /// Whether the hold has outlived its timeout and awaits reclamation.
    pub is_stale: bool,
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (age: {}, timeout: {}{})",
            self.resource_id,
            format_duration(self.age),
            format_duration(self.timeout),
            if self.is_stale { ", STALE" } else { "" }
        )
    }
}

/// Format a duration as a short human-readable string.
pub(crate) fn format_duration(duration: Duration) -> String {
    let delta = chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);
    let millis = delta.num_milliseconds();
    let seconds = delta.num_seconds();
    let minutes = delta.num_minutes();
    let hours = delta.num_hours();

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else if millis >= 1000 && millis % 1000 == 0 {
        format!("{}s", seconds)
    } else if millis >= 1000 {
        format!("{:.1}s", millis as f64 / 1000.0)
    } else {
        format!("{}ms", millis)
    }
}
