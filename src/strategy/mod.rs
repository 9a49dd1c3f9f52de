//! Search policies.
//!
//! Both policies implement [`SearchStrategy`]: the trial runner asks for the
//! next cell to test, performs the test, and reports the outcome back. The
//! runner never needs to know which policy it is driving.
//!
//! - [`naive`]: fixed zigzag order outward from the center
//! - [`bayes`]: argmax-posterior selection with a Bayes update on failure

pub mod bayes;
pub mod naive;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::grid::Grid;

pub use bayes::{apply_failed_test, BayesianSearch};
pub use naive::{naive_sweep_order, NaiveSearch};

/// Which policy is running. Also selects the grid's visit counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Naive,
    Bayesian,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Naive, StrategyKind::Bayesian];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Naive => "naive",
            StrategyKind::Bayesian => "bayesian",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(StrategyKind::Naive),
            "bayes" | "bayesian" => Ok(StrategyKind::Bayesian),
            _ => Err(ConfigError::InvalidValue {
                name: "strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// A cell-selection policy driven one test at a time.
pub trait SearchStrategy {
    fn kind(&self) -> StrategyKind;

    /// Called before the first test of every sweep.
    fn begin_sweep(&mut self, _grid: &Grid) {}

    /// Cell to test next.
    fn select_next(&mut self, grid: &Grid) -> usize;

    /// Outcome of testing `index`.
    fn on_result(&mut self, grid: &mut Grid, index: usize, found: bool);
}

/// Build the policy for `kind` with the parameters in `cfg`.
pub fn make_strategy(kind: StrategyKind, cfg: &SearchConfig) -> Box<dyn SearchStrategy> {
    match kind {
        StrategyKind::Naive => Box::new(NaiveSearch::new()),
        StrategyKind::Bayesian => Box::new(BayesianSearch::new(
            cfg.detection_prob,
            cfg.posterior_update,
        )),
    }
}
