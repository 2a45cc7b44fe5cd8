//! Scheduler backed by the tokio runtime
//!
//! Each scheduled task is a `spawn_local` future that sleeps and then runs
//! the task. Cancelling aborts the future and drops its handle from the live
//! set, and a woken future only runs its task while its handle is still live,
//! so a cancelled task never runs even if its sleep already completed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::{Scheduler, Task, TimerId};

#[derive(Default)]
struct LiveTimers {
    next_id: u64,
    handles: HashMap<TimerId, JoinHandle<()>>,
}

/// Timer service for code running inside a [`tokio::task::LocalSet`].
///
/// [`Scheduler::schedule`] panics when called outside a `LocalSet`, matching
/// [`tokio::task::spawn_local`]. Time is read from [`tokio::time::Instant`] so
/// paused test time is honoured.
#[derive(Clone, Default)]
pub struct TokioTimer {
    inner: Rc<RefCell<LiveTimers>>,
}

impl TokioTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that have neither fired nor been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().handles.len()
    }
}

impl Scheduler for TokioTimer {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = {
            let mut timers = self.inner.borrow_mut();
            let id = TimerId::new(timers.next_id);
            timers.next_id += 1;
            id
        };

        let live = Rc::downgrade(&self.inner);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;

            let still_live = live.upgrade().is_some_and(|timers| {
                let handle = timers.borrow_mut().handles.remove(&id);
                handle.is_some()
            });
            if still_live {
                task();
            }
        });

        self.inner.borrow_mut().handles.insert(id, handle);
        id
    }

    fn cancel(&self, id: TimerId) {
        let handle = self.inner.borrow_mut().handles.remove(&id);
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tokio_timer_tests.rs"]
mod tokio_timer_tests;
