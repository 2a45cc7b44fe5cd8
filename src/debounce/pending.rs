//! Pending-callback slot shared between an owner and its armed timer

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::Callback;
use crate::clock::{Scheduler, TimerId};

/// The latest requested action and the timer that will run it.
///
/// `generation` is bumped every time the timer is disarmed. An armed task
/// remembers the generation it was armed under and becomes a no-op once the
/// slot has moved on, even if the scheduler still runs it.
#[derive(Default)]
pub(crate) struct PendingSlot {
    callback: Option<Callback>,
    timer: Option<TimerId>,
    generation: u64,
    disposed: bool,
}

pub(crate) type SharedSlot = Rc<RefCell<PendingSlot>>;

impl PendingSlot {
    pub(crate) fn shared() -> SharedSlot {
        Rc::new(RefCell::new(Self::default()))
    }

    pub(crate) fn store(&mut self, callback: Callback) {
        self.callback = Some(callback);
    }

    pub(crate) fn take_callback(&mut self) -> Option<Callback> {
        self.callback.take()
    }

    pub(crate) fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(crate) fn mark_disposed(&mut self) {
        self.disposed = true;
    }

    /// Forget the armed timer, returning it so the caller can cancel it.
    fn disarm(&mut self) -> Option<TimerId> {
        self.generation = self.generation.wrapping_add(1);
        self.timer.take()
    }

    /// Claim the callback for a firing timer armed under `generation`.
    fn take_due(&mut self, generation: u64) -> Option<Callback> {
        if self.generation != generation || self.timer.is_none() {
            return None;
        }
        self.timer = None;
        self.callback.take()
    }
}

/// Cancel the slot's armed timer, if any.
pub(crate) fn disarm<S: Scheduler>(scheduler: &S, slot: &SharedSlot) {
    let stale = slot.borrow_mut().disarm();
    if let Some(id) = stale {
        #[cfg(debug_assertions)]
        log::trace!("cancelling {:?}", id);
        scheduler.cancel(id);
    }
}

/// Replace any armed timer with a fresh one firing after `delay`.
///
/// When the timer fires, the callback stored in the slot at that moment is
/// handed to `on_fire`. The slot borrow is released before `on_fire` runs.
///
/// The timer id is recorded after `schedule` returns, which relies on the
/// scheduler never running a task inline.
pub(crate) fn arm<S, F>(scheduler: &S, slot: &SharedSlot, delay: Duration, on_fire: F)
where
    S: Scheduler,
    F: FnOnce(Callback) + 'static,
{
    disarm(scheduler, slot);
    let generation = slot.borrow().generation;

    let weak = Rc::downgrade(slot);
    let id = scheduler.schedule(
        delay,
        Box::new(move || {
            if let Some(callback) = claim(&weak, generation) {
                on_fire(callback);
            }
        }),
    );
    slot.borrow_mut().timer = Some(id);
}

fn claim(slot: &Weak<RefCell<PendingSlot>>, generation: u64) -> Option<Callback> {
    let slot = slot.upgrade()?;
    let callback = slot.borrow_mut().take_due(generation);
    callback
}
