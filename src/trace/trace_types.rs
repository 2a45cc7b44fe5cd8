// Trace file type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraceError;

/// Which primitive an operation is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Debouncer,
    Throttle,
    Controller,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Debouncer => "debouncer",
            Target::Throttle => "throttle",
            Target::Controller => "controller",
        };
        f.pad(name)
    }
}

/// Operation applied to a target
///
/// `Call` maps to `debounce`, `throttle` or `call` depending on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    #[default]
    Call,
    Flush,
    Cancel,
    Dispose,
    Reset,
}

/// Optional per-trace timing overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub struct TraceSettings {
    pub debounce_ms: Option<u64>,
    pub throttle_ms: Option<u64>,
    /// Stop the clock here instead of draining every pending timer
    pub until_ms: Option<u64>,
}

/// One timestamped operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceCall {
    pub at_ms: u64,
    pub target: Target,
    #[serde(default)]
    pub op: Op,
    pub label: Option<String>,
}

/// A complete trace file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub settings: TraceSettings,
    #[serde(default, rename = "call")]
    pub calls: Vec<TraceCall>,
}

impl Trace {
    /// Reject traces that cannot be replayed
    pub fn validate(&self) -> Result<(), TraceError> {
        let mut previous = 0;
        for (index, call) in self.calls.iter().enumerate() {
            let position = index + 1;
            if call.at_ms < previous {
                return Err(TraceError::Invalid(format!(
                    "call {} at {}ms is earlier than the previous call at {}ms",
                    position, call.at_ms, previous
                )));
            }
            previous = call.at_ms;

            match (call.op, call.target) {
                (Op::Call, _) if call.label.is_none() => {
                    return Err(TraceError::Invalid(format!(
                        "call {} has no label",
                        position
                    )));
                }
                (Op::Flush, Target::Throttle | Target::Controller) => {
                    return Err(TraceError::Invalid(format!(
                        "call {}: flush is only supported by the debouncer",
                        position
                    )));
                }
                (Op::Cancel, Target::Throttle) => {
                    return Err(TraceError::Invalid(format!(
                        "call {}: the throttle has nothing to cancel, use reset",
                        position
                    )));
                }
                (Op::Reset, Target::Debouncer | Target::Controller) => {
                    return Err(TraceError::Invalid(format!(
                        "call {}: reset is only supported by the throttle",
                        position
                    )));
                }
                _ => {}
            }
        }

        if let Some(until_ms) = self.settings.until_ms.filter(|&until| until < previous) {
            return Err(TraceError::Invalid(format!(
                "until_ms {}ms is earlier than the last call at {}ms",
                until_ms, previous
            )));
        }
        Ok(())
    }
}
