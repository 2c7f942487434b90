//! Deterministic scheduler driven by explicit time steps.

use super::queue::{TimerQueue, deadline_after};
use super::{Scheduler, Task, TimerId};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

struct State {
    now: Instant,
    timers: TimerQueue,
}

/// Scheduler whose clock only moves when [`advance`](Self::advance) or
/// [`stall`](Self::stall) is called.
///
/// Callbacks run on the thread that advances the clock, in deadline order,
/// with the clock set to each timer's deadline while it runs.
pub struct ManualScheduler {
    state: Mutex<State>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                now: Instant::now(),
                timers: TimerQueue::new(),
            }),
        }
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    ///
    /// Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = deadline_after(self.state.lock().now, by);
        let mut fired = 0;

        loop {
            let task = {
                let mut state = self.state.lock();
                match state.timers.next_deadline() {
                    Some(deadline) if deadline <= target => {
                        if deadline > state.now {
                            state.now = deadline;
                        }
                        let now = state.now;
                        state.timers.pop_due(now)
                    }
                    _ => {
                        state.now = state.now.max(target);
                        None
                    }
                }
            };

            match task {
                Some(task) => {
                    task();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }

    /// Move the clock forward without firing anything.
    ///
    /// Models a starved timer thread: deadlines pass but callbacks have not
    /// run yet. Call [`run_due`](Self::run_due) to catch up.
    pub fn stall(&self, by: Duration) {
        let mut state = self.state.lock();
        state.now = deadline_after(state.now, by);
    }

    /// Fire every timer already due at the current time.
    pub fn run_due(&self) -> usize {
        self.advance(Duration::ZERO)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.state.lock().now
    }

    fn schedule_once(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.lock();
        let deadline = deadline_after(state.now, delay);
        state.timers.push(deadline, None, task)
    }

    fn schedule_repeating(&self, interval: Duration, task: Task) -> TimerId {
        let mut state = self.state.lock();
        let deadline = deadline_after(state.now, interval);
        state.timers.push(deadline, Some(interval), task)
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.state.lock().timers.cancel(id)
    }

    fn pending(&self) -> usize {
        self.state.lock().timers.len()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualScheduler")
            .field("pending", &state.timers.len())
            .finish()
    }
}
