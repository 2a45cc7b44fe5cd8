//! Leading-edge throttle
//!
//! The first call runs immediately. Calls arriving within `window` of the last
//! executed call are dropped, not queued: there is no trailing execution.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::clock::{Scheduler, window_elapsed};
use crate::error::TimingError;

pub struct Throttle<C: Scheduler> {
    clock: C,
    window: Cell<Duration>,
    /// Set only when a callback actually runs
    last_run: Cell<Option<Instant>>,
    disposed: Cell<bool>,
}

impl<C: Scheduler> Throttle<C> {
    pub fn new(clock: C, window: Duration) -> Self {
        Self {
            clock,
            window: Cell::new(window),
            last_run: Cell::new(None),
            disposed: Cell::new(false),
        }
    }

    /// Run `callback` now if the window has elapsed, otherwise drop it.
    ///
    /// Returns `Ok(true)` when the callback ran.
    pub fn throttle<F>(&self, callback: F) -> Result<bool, TimingError>
    where
        F: FnOnce(),
    {
        if self.disposed.get() {
            return Err(TimingError::Disposed("throttle"));
        }

        let now = self.clock.now();
        if !window_elapsed(self.last_run.get(), now, self.window.get()) {
            #[cfg(debug_assertions)]
            log::trace!("throttle: call dropped inside window");
            return Ok(false);
        }

        self.last_run.set(Some(now));
        callback();
        Ok(true)
    }

    /// Forget the last run so the next call executes unconditionally.
    pub fn reset(&self) {
        self.last_run.set(None);
    }

    /// Refuse further calls. Safe to call repeatedly.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    /// `true` if a call made now would execute.
    pub fn is_ready(&self) -> bool {
        !self.disposed.get()
            && window_elapsed(self.last_run.get(), self.clock.now(), self.window.get())
    }

    pub fn set_window(&self, window: Duration) {
        self.window.set(window);
    }

    pub fn window(&self) -> Duration {
        self.window.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod throttle_tests;
