//! Deadline-ordered timer storage shared by both scheduler implementations.

use super::{Task, TimerId};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest delay a timer is armed with; anything longer is clamped to it.
const FAR_FUTURE: Duration = Duration::from_secs(u32::MAX as u64);

/// `from + delay`, clamped so oversized delays cannot overflow `Instant`.
pub(super) fn deadline_after(from: Instant, delay: Duration) -> Instant {
    from.checked_add(delay.min(FAR_FUTURE)).unwrap_or(from)
}

struct Timer {
    deadline: Instant,
    interval: Option<Duration>,
    task: Task,
}

/// Armed timers keyed by id, indexed by deadline.
pub(super) struct TimerQueue {
    next_id: u64,
    timers: HashMap<TimerId, Timer>,
    order: BTreeSet<(Instant, TimerId)>,
}

impl TimerQueue {
    pub(super) fn new() -> Self {
        Self {
            next_id: 0,
            timers: HashMap::new(),
            order: BTreeSet::new(),
        }
    }

    /// Arm a timer. `interval` makes it repeating.
    pub(super) fn push(
        &mut self,
        deadline: Instant,
        interval: Option<Duration>,
        task: Task,
    ) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let interval = interval.map(|i| i.max(MIN_INTERVAL));

        self.order.insert((deadline, id));
        self.timers.insert(
            id,
            Timer {
                deadline,
                interval,
                task,
            },
        );
        id
    }

    pub(super) fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                self.order.remove(&(timer.deadline, id));
                true
            }
            None => false,
        }
    }

    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.order.first().map(|(deadline, _)| *deadline)
    }

    /// Take the earliest timer due at `now`.
    ///
    /// One-shot timers are removed. Repeating timers are re-armed at
    /// `deadline + interval`, or `now + interval` when that is already in the
    /// past, so a stalled clock yields one catch-up tick instead of a burst.
    pub(super) fn pop_due(&mut self, now: Instant) -> Option<Task> {
        let &(deadline, id) = self.order.first()?;
        if deadline > now {
            return None;
        }
        self.order.remove(&(deadline, id));

        let timer = self.timers.get_mut(&id)?;
        match timer.interval {
            Some(interval) => {
                let mut next = deadline_after(deadline, interval);
                if next <= now {
                    next = deadline_after(now, interval);
                }
                timer.deadline = next;
                self.order.insert((next, id));
                Some(Arc::clone(&timer.task))
            }
            None => self.timers.remove(&id).map(|timer| timer.task),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.timers.len()
    }

    pub(super) fn clear(&mut self) {
        self.timers.clear();
        self.order.clear();
    }
}
