//! Scripted call traces replayed against a virtual clock
//!
//! A trace lists timestamped operations on a debouncer, a throttle and a
//! debounce-with-throttle controller. Replaying it reports which labelled
//! callbacks fired, which calls the throttle dropped, and which calls were
//! rejected after disposal.

mod replay;
mod report;
mod trace_types;

pub use replay::{TimingSettings, replay};
pub use report::{Event, EventKind, Report};
pub use trace_types::{Op, Target, Trace, TraceCall, TraceSettings};

use std::fs;
use std::path::Path;

use crate::error::TraceError;

/// Read and validate a TOML trace file
pub fn load_trace(path: &Path) -> Result<Trace, TraceError> {
    let contents = fs::read_to_string(path)?;
    let trace = parse_trace(&contents)?;
    #[cfg(debug_assertions)]
    log::debug!("Loaded trace with {} calls from {:?}", trace.calls.len(), path);
    Ok(trace)
}

/// Parse and validate a TOML trace
pub fn parse_trace(contents: &str) -> Result<Trace, TraceError> {
    let trace: Trace = toml::from_str(contents)?;
    trace.validate()?;
    Ok(trace)
}
