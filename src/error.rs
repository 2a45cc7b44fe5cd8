use thiserror::Error;

/// Precondition violations raised by the timing primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimingError {
    /// The named primitive was used after `dispose()`.
    #[error("{0} used after dispose")]
    Disposed(&'static str),
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid trace file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid trace: {0}")]
    Invalid(String),
}
