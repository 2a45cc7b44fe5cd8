//! Replay results and their text/JSON rendering

use serde::Serialize;
use std::fmt;

use super::trace_types::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The labelled callback ran
    Fired,
    /// The throttle discarded the call
    Dropped,
    /// The target was already disposed
    Rejected,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Fired => "fired",
            EventKind::Dropped => "dropped",
            EventKind::Rejected => "rejected",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub at_ms: u64,
    pub target: Target,
    pub kind: EventKind,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub events: Vec<Event>,
}

impl Report {
    /// Events of one kind, in the order they happened
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    /// Labels of fired callbacks, in firing order
    pub fn fired_labels(&self) -> Vec<&str> {
        self.of_kind(EventKind::Fired)
            .map(|event| event.label.as_str())
            .collect()
    }

    /// One aligned line per event
    pub fn render_text(&self) -> String {
        if self.events.is_empty() {
            return "(no events)\n".to_string();
        }

        let mut out = String::new();
        for event in &self.events {
            out.push_str(&format!(
                "{:>8}ms  {:<10}  {:<8}  {}\n",
                event.at_ms,
                event.target,
                event.kind,
                event.label
            ));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
