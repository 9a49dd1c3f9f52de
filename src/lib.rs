//! # Subsearch: Bayesian vs. naive search over a discretized region
//!
//! Simulates the search for a hidden target placed in one of
//! [`NUM_CELLS`](constants::NUM_CELLS) = 400 cells according to a triangular
//! ("tent") prior peaking at the center, and compares two search policies by
//! the number of cell tests they need before the target is detected.
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Draws | [`sampler`] | Uniform draws on [0,1) and the inverse-CDF tent sampler for target placement |
//! | Detection | [`detection`] | Bernoulli detector: success with probability p only on the occupied cell |
//! | State | [`grid`] | 400 cells with per-strategy visit counters and the posterior belief |
//! | Policy | [`strategy`] | Naive zigzag sweep and argmax-posterior Bayesian search |
//! | Trial | [`simulation::trial`] | One target placement, sweep-retry loop until found |
//! | Batch | [`simulation::engine`] | N independent trials, aggregated search-cost statistics |
//!
//! ## Sweeps
//!
//! A strategy runs at most 400 tests per sweep. A sweep that ends without a
//! detection is not an error: the trial starts another sweep over the same
//! target and keeps counting. The number of sweeps per trial is bounded by
//! [`SearchConfig::max_sweeps`](config::SearchConfig::max_sweeps).
//!
//! ## Posterior update
//!
//! After a failed test the Bayesian strategy applies a two-stage update: the
//! tested cell first, then a pass over every cell (tested cell included). The
//! textbook single-stage update is available as
//! [`PosteriorUpdate::Exact`](config::PosteriorUpdate::Exact).

pub mod config;
pub mod constants;
pub mod detection;
pub mod env_config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod sampler;
pub mod simulation;
pub mod strategy;

pub use config::{PosteriorUpdate, SearchConfig};
pub use error::{ConfigError, SearchError};
