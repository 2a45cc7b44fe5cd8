//! Trace replay on a virtual clock

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::report::{Event, EventKind, Report};
use super::trace_types::{Op, Target, Trace, TraceCall};
use crate::clock::VirtualClock;
use crate::config::TimingConfig;
use crate::debounce::{DebounceThrottle, Debouncer, Throttle};
use crate::error::{TimingError, TraceError};

/// Delays used for a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    pub debounce: Duration,
    pub throttle: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        TimingConfig::default().into()
    }
}

impl From<TimingConfig> for TimingSettings {
    fn from(config: TimingConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            throttle: Duration::from_millis(config.throttle_ms),
        }
    }
}

impl TimingSettings {
    /// Replace the delays that are given, keeping the others
    pub fn overridden(self, debounce_ms: Option<u64>, throttle_ms: Option<u64>) -> Self {
        Self {
            debounce: debounce_ms.map_or(self.debounce, Duration::from_millis),
            throttle: throttle_ms.map_or(self.throttle, Duration::from_millis),
        }
    }
}

type EventLog = Rc<RefCell<Vec<Event>>>;

struct Targets {
    clock: VirtualClock,
    events: EventLog,
    debouncer: Debouncer<VirtualClock>,
    throttle: Throttle<VirtualClock>,
    controller: DebounceThrottle<VirtualClock>,
}

impl Targets {
    fn new(timing: TimingSettings) -> Self {
        let clock = VirtualClock::new();
        Self {
            debouncer: Debouncer::new(clock.clone(), timing.debounce),
            throttle: Throttle::new(clock.clone(), timing.throttle),
            controller: DebounceThrottle::new(clock.clone(), timing.debounce, timing.throttle),
            events: Rc::new(RefCell::new(Vec::new())),
            clock,
        }
    }

    fn record(&self, target: Target, kind: EventKind, label: &str) {
        record(&self.events, &self.clock, target, kind, label);
    }

    /// Callback that records its own firing
    fn fired(&self, target: Target, label: &str) -> impl FnOnce() + use<> {
        fired(self.events.clone(), self.clock.clone(), target, label.to_string())
    }

    fn apply(&self, call: &TraceCall) -> Result<(), TraceError> {
        let label = call.label.as_deref().unwrap_or_default();
        let outcome = match (call.target, call.op) {
            (Target::Debouncer, Op::Call) => self.debouncer.debounce(self.fired(call.target, label)),
            (Target::Debouncer, Op::Flush) => {
                self.debouncer.flush();
                Ok(())
            }
            (Target::Debouncer, Op::Cancel) => {
                self.debouncer.cancel();
                Ok(())
            }
            (Target::Debouncer, Op::Dispose) => {
                self.debouncer.dispose();
                Ok(())
            }
            (Target::Throttle, Op::Call) => self
                .throttle
                .throttle(self.fired(call.target, label))
                .map(|ran| {
                    if !ran {
                        self.record(call.target, EventKind::Dropped, label);
                    }
                }),
            (Target::Throttle, Op::Reset) => {
                self.throttle.reset();
                Ok(())
            }
            (Target::Throttle, Op::Dispose) => {
                self.throttle.dispose();
                Ok(())
            }
            (Target::Controller, Op::Call) => self
                .controller
                .call(self.fired(call.target, label))
                .map(|_| ()),
            (Target::Controller, Op::Cancel) => {
                self.controller.cancel();
                Ok(())
            }
            (Target::Controller, Op::Dispose) => {
                self.controller.dispose();
                Ok(())
            }
            (target, op) => {
                return Err(TraceError::Invalid(format!(
                    "{:?} is not supported by the {}",
                    op, target
                )));
            }
        };

        if let Err(TimingError::Disposed(what)) = outcome {
            log::warn!("{} at {}ms: {} used after dispose", label, call.at_ms, what);
            self.record(call.target, EventKind::Rejected, label);
        }
        Ok(())
    }
}

fn fired(events: EventLog, clock: VirtualClock, target: Target, label: String) -> impl FnOnce() {
    move || record(&events, &clock, target, EventKind::Fired, &label)
}

fn record(events: &EventLog, clock: &VirtualClock, target: Target, kind: EventKind, label: &str) {
    let at_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
    events.borrow_mut().push(Event {
        at_ms,
        target,
        kind,
        label: label.to_string(),
    });
}

/// Replay `trace` from time zero and report what happened
///
/// The clock is advanced to each call's `at_ms` (firing due timers first), the
/// operation is applied, and finally the clock runs to `until_ms` or, if that
/// is unset, until no timers remain.
pub fn replay(trace: &Trace, timing: TimingSettings) -> Result<Report, TraceError> {
    trace.validate()?;
    #[cfg(debug_assertions)]
    log::debug!(
        "Replaying {} calls with debounce {:?}, throttle {:?}",
        trace.calls.len(),
        timing.debounce,
        timing.throttle
    );

    let targets = Targets::new(timing);
    for call in &trace.calls {
        targets.clock.advance_to(Duration::from_millis(call.at_ms));
        targets.apply(call)?;
    }

    match trace.settings.until_ms {
        Some(until_ms) => {
            targets.clock.advance_to(Duration::from_millis(until_ms));
        }
        None => {
            targets.clock.run_until_idle();
        }
    }

    let events = targets.events.take();
    Ok(Report { events })
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod replay_tests;
