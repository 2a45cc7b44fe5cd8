//! Manually advanced clock with an ordered timer queue

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{Scheduler, Task, TimerId};

struct VirtualState {
    origin: Instant,
    elapsed: Duration,
    next_id: u64,
    /// Due tasks ordered by deadline, then by scheduling order
    queue: BTreeMap<(Duration, TimerId), Task>,
    deadlines: HashMap<TimerId, Duration>,
}

/// Deterministic clock for tests and trace replay.
///
/// Time only moves when [`advance`](Self::advance),
/// [`advance_to`](Self::advance_to) or [`run_until_idle`](Self::run_until_idle)
/// is called. Due tasks run in deadline order and the clock reads exactly the
/// task's deadline while it runs. Tasks may schedule or cancel other timers.
///
/// Cloning yields another handle to the same clock.
#[derive(Clone)]
pub struct VirtualClock {
    inner: Rc<RefCell<VirtualState>>,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("VirtualClock")
            .field("elapsed", &state.elapsed)
            .field("pending_timers", &state.queue.len())
            .finish()
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VirtualState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
                deadlines: HashMap::new(),
            })),
        }
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().elapsed
    }

    /// Number of scheduled tasks that have neither fired nor been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Move the clock forward by `by`, running every task that becomes due.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.elapsed() + by;
        self.advance_to(target)
    }

    /// Move the clock to `target` (measured from creation), running every task
    /// due at or before it. A target in the past leaves the clock unchanged.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some(task) = self.pop_due(Some(target)) {
            task();
            fired += 1;
        }

        let mut state = self.inner.borrow_mut();
        if target > state.elapsed {
            state.elapsed = target;
        }
        fired
    }

    /// Run tasks in deadline order until the queue is empty.
    ///
    /// Does not terminate if tasks keep rescheduling themselves.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(task) = self.pop_due(None) {
            task();
            fired += 1;
        }
        fired
    }

    /// Remove the earliest task due at or before `limit`, moving the clock to
    /// its deadline. The borrow is released before the task runs.
    fn pop_due(&self, limit: Option<Duration>) -> Option<Task> {
        let mut state = self.inner.borrow_mut();
        let (&(deadline, id), _) = state.queue.first_key_value()?;
        if limit.is_some_and(|limit| deadline > limit) {
            return None;
        }

        let task = state.queue.remove(&(deadline, id))?;
        state.deadlines.remove(&id);
        if deadline > state.elapsed {
            state.elapsed = deadline;
        }
        #[cfg(debug_assertions)]
        log::trace!("virtual clock firing {:?} at {:?}", id, deadline);
        Some(task)
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Instant {
        let state = self.inner.borrow();
        state.origin + state.elapsed
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.inner.borrow_mut();
        let id = TimerId::new(state.next_id);
        state.next_id += 1;

        let deadline = state.elapsed + delay;
        state.queue.insert((deadline, id), task);
        state.deadlines.insert(id, deadline);
        id
    }

    fn cancel(&self, id: TimerId) {
        let mut state = self.inner.borrow_mut();
        if let Some(deadline) = state.deadlines.remove(&id) {
            state.queue.remove(&(deadline, id));
        }
    }
}

#[cfg(test)]
#[path = "virtual_clock_tests.rs"]
mod virtual_clock_tests;
