//! atomic-timing library - call coalescing primitives
//!
//! Debounce, throttle and debounce-with-throttle over a pluggable timer, the
//! search and pagination helpers built on them, and the trace replay used by
//! the `atomic-timing` binary.

pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod paging;
pub mod search;
pub mod trace;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use clock::{Scheduler, TimerId, TokioTimer, VirtualClock};
pub use config::Config;
pub use debounce::{DebounceThrottle, Debouncer, Dispatch, Throttle};
pub use error::{TimingError, TraceError};
