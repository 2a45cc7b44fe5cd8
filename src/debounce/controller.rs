//! Debounce-with-throttle controller
//!
//! A call runs immediately when the throttle window allows it. Calls arriving
//! while throttled arm a trailing debounce that runs whichever callback was
//! stored last when the timer fires.
//!
//! State machine:
//!
//! ```text
//! Idle --call--> Immediate (ran, window open)
//! Immediate --call inside window--> Pending (trailing timer armed)
//! Pending --call inside window--> Pending (timer re-armed, callback replaced)
//! Pending --call after window--> Immediate (trailing timer cancelled)
//! Pending --timer fires--> Immediate (latest callback ran)
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::pending::{self, PendingSlot, SharedSlot};
use crate::clock::{Scheduler, window_elapsed};
use crate::error::TimingError;

/// How a [`DebounceThrottle::call`] was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The callback ran before `call` returned.
    Immediate,
    /// The callback is pending behind a trailing debounce timer.
    Deferred,
}

pub struct DebounceThrottle<S: Scheduler + Clone + 'static> {
    scheduler: S,
    debounce_delay: Cell<Duration>,
    throttle_window: Cell<Duration>,
    /// Shared with the trailing timer, which records its own run
    last_run: Rc<Cell<Option<Instant>>>,
    slot: SharedSlot,
}

impl<S: Scheduler + Clone + 'static> DebounceThrottle<S> {
    pub fn new(scheduler: S, debounce_delay: Duration, throttle_window: Duration) -> Self {
        Self {
            scheduler,
            debounce_delay: Cell::new(debounce_delay),
            throttle_window: Cell::new(throttle_window),
            last_run: Rc::new(Cell::new(None)),
            slot: PendingSlot::shared(),
        }
    }

    /// Run `callback` now if the throttle window elapsed, otherwise defer it.
    pub fn call<F>(&self, callback: F) -> Result<Dispatch, TimingError>
    where
        F: FnOnce() + 'static,
    {
        if self.is_disposed() {
            return Err(TimingError::Disposed("debounce-throttle controller"));
        }

        self.slot.borrow_mut().store(Box::new(callback));

        let now = self.scheduler.now();
        if window_elapsed(self.last_run.get(), now, self.throttle_window.get()) {
            // The immediate run supersedes any trailing timer armed earlier
            pending::disarm(&self.scheduler, &self.slot);
            let callback = self.slot.borrow_mut().take_callback();
            self.last_run.set(Some(now));
            if let Some(callback) = callback {
                callback();
            }
            return Ok(Dispatch::Immediate);
        }

        let clock = self.scheduler.clone();
        let last_run = self.last_run.clone();
        pending::arm(
            &self.scheduler,
            &self.slot,
            self.debounce_delay.get(),
            move |callback| {
                last_run.set(Some(clock.now()));
                callback();
            },
        );
        #[cfg(debug_assertions)]
        log::trace!("debounce-throttle: call deferred");
        Ok(Dispatch::Deferred)
    }

    /// Cancel the trailing run. The throttle window is left untouched.
    pub fn cancel(&self) {
        pending::disarm(&self.scheduler, &self.slot);
        if self.slot.borrow_mut().take_callback().is_some() {
            #[cfg(debug_assertions)]
            log::debug!("debounce-throttle: pending callback cancelled");
        }
    }

    /// Cancel the trailing run and reopen the throttle window, so the next
    /// call runs immediately.
    pub fn reset(&self) {
        self.cancel();
        self.last_run.set(None);
    }

    /// Cancel pending work and refuse further calls. Safe to call repeatedly.
    pub fn dispose(&self) {
        self.cancel();
        self.slot.borrow_mut().mark_disposed();
    }

    /// `true` while a trailing run is armed.
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_armed()
    }

    pub fn is_disposed(&self) -> bool {
        self.slot.borrow().is_disposed()
    }

    pub fn set_debounce_delay(&self, delay: Duration) {
        self.debounce_delay.set(delay);
    }

    pub fn set_throttle_window(&self, window: Duration) {
        self.throttle_window.set(window);
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay.get()
    }

    pub fn throttle_window(&self) -> Duration {
        self.throttle_window.get()
    }
}

impl<S: Scheduler + Clone + 'static> Drop for DebounceThrottle<S> {
    fn drop(&mut self) {
        pending::disarm(&self.scheduler, &self.slot);
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
