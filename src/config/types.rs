// Configuration type definitions

use serde::Deserialize;

fn default_debounce_ms() -> u64 {
    500
}

fn default_throttle_ms() -> u64 {
    1000
}

/// Search waits less than the generic debounce so results feel live
fn default_search_debounce_ms() -> u64 {
    300
}

fn default_min_chars() -> usize {
    2
}

/// Trailing delay for a load-more request made while throttled
fn default_paging_debounce_ms() -> u64 {
    250
}

fn default_threshold() -> f64 {
    200.0
}

/// Default timings for the debounce and throttle primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            debounce_ms: default_debounce_ms(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

/// Search-as-you-type configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_debounce_ms")]
    pub debounce_ms: u64,
    /// Shorter queries are not submitted
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: default_search_debounce_ms(),
            min_chars: default_min_chars(),
        }
    }
}

/// Paginated list configuration section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_paging_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// Distance from the end of the list that triggers the next page
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            debounce_ms: default_paging_debounce_ms(),
            throttle_ms: default_throttle_ms(),
            threshold: default_threshold(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}


#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
