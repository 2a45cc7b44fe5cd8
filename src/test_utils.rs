//! Shared test utilities for atomic-timing
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::clock::VirtualClock;

    /// Shorthand for a millisecond duration
    pub fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Records which labelled callbacks ran and at what virtual time
    #[derive(Clone)]
    pub struct Recorder {
        clock: VirtualClock,
        runs: Rc<RefCell<Vec<(&'static str, Duration)>>>,
    }

    impl Recorder {
        pub fn new(clock: &VirtualClock) -> Self {
            Self {
                clock: clock.clone(),
                runs: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Callback that records `label` with the clock time it ran at
        pub fn callback(&self, label: &'static str) -> impl FnOnce() + use<> {
            let clock = self.clock.clone();
            let runs = self.runs.clone();
            move || runs.borrow_mut().push((label, clock.elapsed()))
        }

        pub fn runs(&self) -> Vec<(&'static str, Duration)> {
            self.runs.borrow().clone()
        }

        pub fn labels(&self) -> Vec<&'static str> {
            self.runs.borrow().iter().map(|(label, _)| *label).collect()
        }

        pub fn count(&self) -> usize {
            self.runs.borrow().len()
        }
    }
}
