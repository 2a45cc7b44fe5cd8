//! Call coalescing primitives
//!
//! - [`Debouncer`]: trailing edge, keeps only the latest call
//! - [`Throttle`]: leading edge, drops calls inside the window
//! - [`DebounceThrottle`]: runs immediately when the window allows, otherwise
//!   defers the latest call to a trailing debounce
//!
//! All primitives are single-threaded and must be driven from the thread
//! that owns them. Using any of them after `dispose()` returns
//! [`TimingError::Disposed`](crate::error::TimingError::Disposed).

mod controller;
mod debouncer;
mod pending;
mod throttle;

pub use controller::{DebounceThrottle, Dispatch};
pub use debouncer::Debouncer;
pub use throttle::Throttle;

/// A stored zero-argument action. Each stored callback runs at most once.
pub type Callback = Box<dyn FnOnce() + 'static>;
