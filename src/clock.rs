//! Timer abstraction the coalescing primitives run on
//!
//! A [`Scheduler`] reads the current time, fires a task once after a delay,
//! and cancels a task before it fires. Two backends are provided:
//! [`VirtualClock`] is advanced by hand (tests, trace replay) and
//! [`TokioTimer`] sleeps on the tokio runtime.

mod tokio_timer;
mod virtual_clock;

pub use tokio_timer::TokioTimer;
pub use virtual_clock::VirtualClock;

use std::time::{Duration, Instant};

/// A deferred unit of work handed to a scheduler.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Host timer service.
///
/// Implementations must guarantee that a task whose handle was passed to
/// [`Scheduler::cancel`] never runs. Cancelling an unknown or already fired
/// handle is a no-op.
///
/// [`Scheduler::schedule`] must return before the task runs, even for a zero
/// delay. Callers record the returned handle after scheduling, so a task run
/// inline would find no armed timer and drop its callback.
pub trait Scheduler {
    /// Current time as seen by this scheduler.
    fn now(&self) -> Instant;

    /// Run `task` once, `delay` from now. Never runs `task` inline.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Prevent a scheduled task from running.
    fn cancel(&self, id: TimerId);
}

/// `true` when `window` has fully elapsed between `last` and `now`.
pub(crate) fn window_elapsed(last: Option<Instant>, now: Instant, window: Duration) -> bool {
    match last {
        Some(last) => now.saturating_duration_since(last) >= window,
        None => true,
    }
}
