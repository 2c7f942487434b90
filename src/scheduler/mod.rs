//! Timer and clock abstraction used by the lock registry.
//!
//! The registry never reads the wall clock or spawns timers on its own; it
//! goes through a [`Scheduler`] it was handed at construction time. Two
//! implementations ship with the crate:
//!
//! - [`ThreadScheduler`]: a single background worker thread that sleeps until
//!   the next deadline. Used by the binary and by real deployments.
//! - [`ManualScheduler`]: a deterministic clock that only moves when told to.
//!   Used by tests so expiry can be exercised without sleeping.
//!
//! # Callbacks
//!
//! Timer callbacks are run without any scheduler lock held, so a callback may
//! call back into the scheduler (cancel, schedule) or into code that does.

mod manual;
mod queue;
mod thread;


use std::sync::Arc;
use std::time::{Duration, Instant};

pub use manual::ManualScheduler;
pub use thread::ThreadScheduler;

/// Callback run when a timer fires.
pub type Task = Arc<dyn Fn() + Send + Sync>;

/// Identifier of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Source of time and one-shot/repeating timers.
pub trait Scheduler: Send + Sync {
    /// Current instant according to this scheduler's clock.
    fn now(&self) -> Instant;

    /// Run `task` once after `delay`.
    ///
    /// Delays too large to represent as a deadline are clamped to the far
    /// future; they never panic.
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerId;

    /// Run `task` every `interval` until cancelled.
    ///
    /// A zero interval is treated as one millisecond.
    fn schedule_repeating(&self, interval: Duration, task: Task) -> TimerId;

    /// Cancel a pending timer.
    ///
    /// Returns `true` if the timer was still armed. Cancelling a timer that
    /// already fired (one-shot) or was already cancelled is a no-op.
    fn cancel(&self, id: TimerId) -> bool;

    /// Number of timers currently armed.
    fn pending(&self) -> usize;
}
