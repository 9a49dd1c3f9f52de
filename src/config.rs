//! Simulation configuration: trial count, detector strength, seed and
//! posterior-update variant.
//!
//! Values come from [`SearchConfig::default`], environment variables
//! ([`SearchConfig::from_env`]) or command-line flags in the binary. Every
//! path ends in [`SearchConfig::validate`] before a batch runs.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DETECTION_PROB, DEFAULT_MAX_SWEEPS, DEFAULT_NUM_TRIALS};
use crate::error::ConfigError;

pub const ENV_TRIALS: &str = "SUBSEARCH_TRIALS";
pub const ENV_DETECTION_PROB: &str = "SUBSEARCH_DETECTION_PROB";
pub const ENV_SEED: &str = "SUBSEARCH_SEED";
pub const ENV_MAX_SWEEPS: &str = "SUBSEARCH_MAX_SWEEPS";
pub const ENV_POSTERIOR_UPDATE: &str = "SUBSEARCH_POSTERIOR_UPDATE";

/// How the Bayesian strategy revises its belief after a failed test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteriorUpdate {
    /// Tested cell `q' = (1-p)q / (1-pq)`, then every cell (tested cell
    /// included) `x'' = x' / (1-px')`, rescaled to unit mass.
    #[default]
    DoubleAdjusted,
    /// Tested cell `(1-p)q / (1-pq)`, every other cell `x / (1-pq)`.
    Exact,
}

impl PosteriorUpdate {
    pub fn name(self) -> &'static str {
        match self {
            PosteriorUpdate::DoubleAdjusted => "double",
            PosteriorUpdate::Exact => "exact",
        }
    }
}

impl fmt::Display for PosteriorUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PosteriorUpdate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" | "double_adjusted" | "double-adjusted" => Ok(PosteriorUpdate::DoubleAdjusted),
            "exact" => Ok(PosteriorUpdate::Exact),
            _ => Err(ConfigError::InvalidValue {
                name: "posterior update",
                value: s.to_string(),
            }),
        }
    }
}

/// Parameters of one Monte Carlo batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of independent trials.
    pub num_trials: usize,
    /// Probability that testing the occupied cell detects the target.
    pub detection_prob: f64,
    /// Seed of the random stream(s).
    pub seed: u64,
    /// Sweeps allowed per trial before the trial is abandoned as an error.
    pub max_sweeps: u32,
    pub posterior_update: PosteriorUpdate,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_trials: DEFAULT_NUM_TRIALS,
            detection_prob: DEFAULT_DETECTION_PROB,
            seed: clock_seed(),
            max_sweeps: DEFAULT_MAX_SWEEPS,
            posterior_update: PosteriorUpdate::default(),
        }
    }
}

impl SearchConfig {
    /// Default configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Fail fast on values that would make a batch meaningless or endless.
    ///
    /// p = 1 is accepted (deterministic detector); p = 0 would never terminate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_trials == 0 {
            return Err(ConfigError::NonPositiveTrials(self.num_trials));
        }
        if !(self.detection_prob > 0.0 && self.detection_prob <= 1.0) {
            return Err(ConfigError::DetectionProbOutOfRange(self.detection_prob));
        }
        if self.max_sweeps == 0 {
            return Err(ConfigError::NonPositiveMaxSweeps(self.max_sweeps));
        }
        Ok(())
    }

    /// Read overrides from `SUBSEARCH_*` environment variables on top of the
    /// defaults, then validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_TRIALS)? {
            cfg.num_trials = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_DETECTION_PROB)? {
            cfg.detection_prob = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SEED)? {
            cfg.seed = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MAX_SWEEPS)? {
            cfg.max_sweeps = v;
        }
        if let Some(raw) = lookup(ENV_POSTERIOR_UPDATE) {
            cfg.posterior_update = raw.parse()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}

/// Seed derived from the wall clock, for runs that don't pin one.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
