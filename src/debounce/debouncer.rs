//! Trailing-edge debouncer
//!
//! Of a burst of `debounce` calls arriving within `delay` of each other, only
//! the last callback runs, once, `delay` after the last call.

use std::cell::Cell;
use std::time::Duration;

use super::pending::{self, PendingSlot, SharedSlot};
use crate::clock::Scheduler;
use crate::error::TimingError;

pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Cell<Duration>,
    slot: SharedSlot,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay: Cell::new(delay),
            slot: PendingSlot::shared(),
        }
    }

    /// Store `callback` as the pending action and restart the quiet period.
    ///
    /// Any previously pending callback is discarded and its timer cancelled.
    pub fn debounce<F>(&self, callback: F) -> Result<(), TimingError>
    where
        F: FnOnce() + 'static,
    {
        if self.is_disposed() {
            return Err(TimingError::Disposed("debouncer"));
        }

        self.slot.borrow_mut().store(Box::new(callback));
        pending::arm(&self.scheduler, &self.slot, self.delay.get(), |callback| {
            callback()
        });
        Ok(())
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&self) {
        pending::disarm(&self.scheduler, &self.slot);
        if self.slot.borrow_mut().take_callback().is_some() {
            #[cfg(debug_assertions)]
            log::debug!("debouncer: pending callback cancelled");
        }
    }

    /// Run the pending callback now instead of waiting for the timer.
    ///
    /// Returns `true` if a callback ran. The timer is cancelled first, so the
    /// callback cannot run a second time.
    pub fn flush(&self) -> bool {
        pending::disarm(&self.scheduler, &self.slot);
        let callback = self.slot.borrow_mut().take_callback();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Cancel pending work and refuse further calls. Safe to call repeatedly.
    pub fn dispose(&self) {
        self.cancel();
        self.slot.borrow_mut().mark_disposed();
    }

    /// Change the quiet period used by the next `debounce` call.
    ///
    /// An already armed timer keeps its original deadline.
    pub fn set_delay(&self, delay: Duration) {
        self.delay.set(delay);
    }

    pub fn delay(&self) -> Duration {
        self.delay.get()
    }

    /// `true` while a callback is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        let slot = self.slot.borrow();
        slot.is_armed() && slot.has_callback()
    }

    pub fn is_disposed(&self) -> bool {
        self.slot.borrow().is_disposed()
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        pending::disarm(&self.scheduler, &self.slot);
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
