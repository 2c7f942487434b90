//! Lock registry: acquisition, release, expiry, sweep and shutdown.

use super::guard::LockGuard;
use super::types::{LockEntry, LockInfo};
use crate::config::{Config, DEFAULT_LOCK_TIMEOUT, DEFAULT_SWEEP_INTERVAL};
use crate::error::{LobbyLockError, Result};
use crate::scheduler::{Scheduler, TimerId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info};

/// State of the background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    /// Never configured; the first acquisition arms the default interval.
    Unconfigured,
    /// Explicitly configured with a zero interval.
    Disabled,
    Scheduled { timer: TimerId, interval: Duration },
}

struct RegistryState {
    entries: HashMap<String, LockEntry>,
    next_generation: u64,
    sweep: Sweep,
}

pub(super) struct RegistryInner {
    scheduler: Arc<dyn Scheduler>,
    default_timeout: Duration,
    state: Mutex<RegistryState>,
}

/// Fail-fast mutual exclusion over resource identifiers.
///
/// Cloning the registry yields another handle to the same set of locks.
///
/// Lock ordering: the registry mutex may be held while calling into the
/// scheduler, never the other way around. Scheduler callbacks run without
/// scheduler locks held, so expiry and sweep re-enter the registry freely.
#[derive(Clone)]
pub struct LockRegistry {
    inner: Arc<RegistryInner>,
}

impl LockRegistry {
    /// Create a registry with the default timeout and an unconfigured sweep.
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::build(scheduler, DEFAULT_LOCK_TIMEOUT)
    }

    /// Create a registry from configuration and arm its sweep immediately.
    pub fn from_config(config: &Config, scheduler: Arc<dyn Scheduler>) -> Self {
        let registry = Self::build(scheduler, config.default_timeout());
        registry.configure(config.sweep_interval());
        registry
    }

    fn build(scheduler: Arc<dyn Scheduler>, default_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                scheduler,
                default_timeout,
                state: Mutex::new(RegistryState {
                    entries: HashMap::new(),
                    next_generation: 0,
                    sweep: Sweep::Unconfigured,
                }),
            }),
        }
    }

    /// Replace the background sweep schedule.
    ///
    /// A zero interval disables sweeping; per-lock timers still reclaim
    /// expired holds.
    pub fn configure(&self, sweep_interval: Duration) {
        let mut state = self.inner.state.lock();
        if let Sweep::Scheduled { timer, .. } = state.sweep {
            self.inner.scheduler.cancel(timer);
        }
        state.sweep = self.inner.arm_sweep(sweep_interval);
        debug!(
            sweep_interval_ms = millis(sweep_interval),
            "lock sweep configured"
        );
    }

    /// Acquire `resource_id` with the registry's default timeout.
    pub fn acquire(&self, resource_id: &str) -> Result<LockGuard> {
        self.acquire_with_timeout(resource_id, self.inner.default_timeout)
    }

    /// Acquire `resource_id` for at most `timeout`.
    ///
    /// Never waits: if the resource is held, fails at once with
    /// [`LobbyLockError::LockHeld`].
    pub fn acquire_with_timeout(&self, resource_id: &str, timeout: Duration) -> Result<LockGuard> {
        let inner = &self.inner;
        let mut state = inner.state.lock();

        if state.sweep == Sweep::Unconfigured {
            state.sweep = inner.arm_sweep(DEFAULT_SWEEP_INTERVAL);
        }

        if state.entries.contains_key(resource_id) {
            debug!(resource_id, "lock contended");
            return Err(LobbyLockError::LockHeld(resource_id.to_string()));
        }

        state.next_generation += 1;
        let generation = state.next_generation;

        let expiry = {
            let registry = Arc::downgrade(inner);
            let resource_id = resource_id.to_string();
            Arc::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.expire(&resource_id, generation);
                }
            })
        };
        let timer = inner.scheduler.schedule_once(timeout, expiry);

        state.entries.insert(
            resource_id.to_string(),
            LockEntry {
                acquired_at: inner.scheduler.now(),
                timeout,
                generation,
                timer,
            },
        );

        debug!(
            resource_id,
            generation,
            timeout_ms = millis(timeout),
            "lock acquired"
        );
        Ok(LockGuard::new(
            Arc::downgrade(inner),
            resource_id.to_string(),
            generation,
        ))
    }

    /// Remove the hold on `resource_id`, whoever owns it.
    ///
    /// Releasing an unlocked resource is a no-op.
    pub fn release(&self, resource_id: &str) {
        let mut state = self.inner.state.lock();
        if let Some(entry) = state.entries.remove(resource_id) {
            self.inner.scheduler.cancel(entry.timer);
            debug!(resource_id, generation = entry.generation, "lock released");
        }
    }

    pub fn is_locked(&self, resource_id: &str) -> bool {
        self.inner.state.lock().entries.contains_key(resource_id)
    }

    /// Remove every hold older than its own timeout.
    ///
    /// Returns the number of holds reclaimed.
    pub fn cleanup(&self) -> usize {
        self.inner.cleanup()
    }

    /// Cancel the sweep and clear every hold, expired or not.
    ///
    /// The registry returns to its unconfigured state; a later acquisition
    /// arms the default sweep again.
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        if let Sweep::Scheduled { timer, .. } = state.sweep {
            self.inner.scheduler.cancel(timer);
        }
        state.sweep = Sweep::Unconfigured;

        let cleared = state.entries.len();
        for (_, entry) in state.entries.drain() {
            self.inner.scheduler.cancel(entry.timer);
        }
        debug!(cleared, "lock registry shut down");
    }

    /// Run `f` while holding `resource_id`.
    ///
    /// The hold is released when `f` returns or unwinds. On contention `f`
    /// is not run.
    pub fn with_lock<T>(
        &self,
        resource_id: &str,
        timeout: Duration,
        f: impl FnOnce() -> T,
    ) -> Result<T> {
        let guard = self.acquire_with_timeout(resource_id, timeout)?;
        let output = f();
        guard.release();
        Ok(output)
    }

    /// Snapshot of every live hold, sorted by resource id.
    pub fn list_locks(&self) -> Vec<LockInfo> {
        let now = self.inner.scheduler.now();
        let state = self.inner.state.lock();

        let mut locks: Vec<LockInfo> = state
            .entries
            .iter()
            .map(|(resource_id, entry)| LockInfo {
                resource_id: resource_id.clone(),
                age: entry.age(now),
                timeout: entry.timeout,
                is_stale: entry.is_stale(now),
            })
            .collect();

        locks.sort_by(|a, b| a.resource_id.cmp(&b.resource_id));
        locks
    }

    /// Number of live holds.
    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_timeout(&self) -> Duration {
        self.inner.default_timeout
    }

    /// Current sweep interval, `None` when sweeping is off or not yet armed.
    pub fn sweep_interval(&self) -> Option<Duration> {
        match self.inner.state.lock().sweep {
            Sweep::Scheduled { interval, .. } => Some(interval),
            Sweep::Unconfigured | Sweep::Disabled => None,
        }
    }
}

impl std::fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("LockRegistry")
            .field("locks", &state.entries.len())
            .field("sweep", &state.sweep)
            .field("default_timeout", &self.inner.default_timeout)
            .finish()
    }
}

/// Milliseconds for log fields, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl RegistryInner {
    fn arm_sweep(self: &Arc<Self>, interval: Duration) -> Sweep {
        if interval.is_zero() {
            return Sweep::Disabled;
        }

        let registry: Weak<Self> = Arc::downgrade(self);
        let timer = self.scheduler.schedule_repeating(
            interval,
            Arc::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.cleanup();
                }
            }),
        );
        Sweep::Scheduled { timer, interval }
    }

    /// Timer callback: drop the hold only if it is still the one armed.
    fn expire(&self, resource_id: &str, generation: u64) {
        let mut state = self.state.lock();
        if state
            .entries
            .get(resource_id)
            .is_some_and(|entry| entry.generation == generation)
        {
            state.entries.remove(resource_id);
        }
    }

    /// Guard release: same identity check as expiry, plus timer cancel.
    pub(super) fn release_generation(&self, resource_id: &str, generation: u64) -> bool {
        let mut state = self.state.lock();
        let matches = state
            .entries
            .get(resource_id)
            .is_some_and(|entry| entry.generation == generation);
        if !matches {
            return false;
        }

        if let Some(entry) = state.entries.remove(resource_id) {
            self.scheduler.cancel(entry.timer);
        }
        debug!(resource_id, generation, "lock released");
        true
    }

    fn cleanup(&self) -> usize {
        let mut state = self.state.lock();
        let now = self.scheduler.now();
        let before = state.entries.len();

        let scheduler = &self.scheduler;
        state.entries.retain(|_, entry| {
            if entry.is_stale(now) {
                scheduler.cancel(entry.timer);
                false
            } else {
                true
            }
        });

        let reclaimed = before - state.entries.len();
        drop(state);

        if reclaimed > 0 {
            info!(reclaimed, "lock cleanup removed stale locks");
        }
        reclaimed
    }
}

impl Drop for RegistryInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Sweep::Scheduled { timer, .. } = state.sweep {
            self.scheduler.cancel(timer);
        }
        for entry in state.entries.values() {
            self.scheduler.cancel(entry.timer);
        }
    }
}
