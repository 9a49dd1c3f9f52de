//! Error types for configuration and search.

use thiserror::Error;

/// Configuration rejected at validation time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("trial count must be positive, got {0}")]
    NonPositiveTrials(usize),

    #[error("detection probability must be in (0, 1], got {0}")]
    DetectionProbOutOfRange(f64),

    #[error("maximum sweep count must be positive, got {0}")]
    NonPositiveMaxSweeps(u32),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Top-level error type for running trials and batches.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("target in cell {target} not found after {sweeps} sweeps ({searches} searches)")]
    SweepLimitExceeded {
        target: usize,
        sweeps: u32,
        searches: u64,
    },
}
