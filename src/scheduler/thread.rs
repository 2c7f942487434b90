//! Background-thread scheduler.

use super::queue::{TimerQueue, deadline_after};
use super::{Scheduler, Task, TimerId};
use crate::error::{LobbyLockError, Result};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

const WORKER_NAME: &str = "lobbylock-timer";

struct State {
    timers: TimerQueue,
    stopped: bool,
}

struct Shared {
    state: Mutex<State>,
    wakeup: Condvar,
}

/// Scheduler backed by one worker thread.
///
/// The worker is detached: it never keeps the process alive, and it exits on
/// its own once the scheduler is dropped. Pending timers are discarded on
/// drop without running.
pub struct ThreadScheduler {
    shared: Arc<Shared>,
}

impl ThreadScheduler {
    /// Spawn the worker thread.
    pub fn new() -> Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                timers: TimerQueue::new(),
                stopped: false,
            }),
            wakeup: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || run_worker(&worker))
            .map_err(|e| {
                LobbyLockError::SchedulerError(format!("failed to spawn timer thread: {}", e))
            })?;

        Ok(Self { shared })
    }

    fn arm(&self, delay: Duration, interval: Option<Duration>, task: Task) -> TimerId {
        let deadline = deadline_after(Instant::now(), delay);
        let mut state = self.shared.state.lock();
        let id = state.timers.push(deadline, interval, task);
        // The new deadline may be earlier than the one the worker sleeps on.
        self.shared.wakeup.notify_one();
        id
    }
}

impl Scheduler for ThreadScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule_once(&self, delay: Duration, task: Task) -> TimerId {
        self.arm(delay, None, task)
    }

    fn schedule_repeating(&self, interval: Duration, task: Task) -> TimerId {
        self.arm(interval, Some(interval), task)
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.shared.state.lock().timers.cancel(id)
    }

    fn pending(&self) -> usize {
        self.shared.state.lock().timers.len()
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.stopped = true;
        state.timers.clear();
        self.shared.wakeup.notify_all();
    }
}

impl std::fmt::Debug for ThreadScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ThreadScheduler")
            .field("pending", &state.timers.len())
            .field("stopped", &state.stopped)
            .finish()
    }
}

fn run_worker(shared: &Shared) {
    let mut state = shared.state.lock();
    loop {
        if state.stopped {
            return;
        }

        if let Some(task) = state.timers.pop_due(Instant::now()) {
            MutexGuard::unlocked(&mut state, || run_task(&task));
            continue;
        }

        match state.timers.next_deadline() {
            Some(deadline) => {
                shared.wakeup.wait_until(&mut state, deadline);
            }
            None => shared.wakeup.wait(&mut state),
        }
    }
}

fn run_task(task: &Task) {
    if panic::catch_unwind(AssertUnwindSafe(|| task())).is_err() {
        warn!("timer callback panicked; continuing with remaining timers");
    }
}
