//! Monte Carlo driver: runs N independent trials of one strategy.
//!
//! Two execution modes:
//!
//! - [`simulate_batch`]: trials in parallel with rayon. Trial `i` owns its
//!   grid and a `SmallRng` seeded with `seed + i`, so the result depends only
//!   on the seed and the trial count, never on the thread count.
//! - [`simulate_batch_sequential`]: one stream seeded once, consumed by the
//!   trials in order.
//!
//! Both collect per-trial outcomes first and reduce afterwards.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::info;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::sampler::UniformSampler;
use crate::strategy::StrategyKind;

use super::statistics::percentile;
use super::trial::{run_trial, TrialOutcome};

/// Aggregate search cost of one batch.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub strategy: StrategyKind,
    pub seed: u64,
    /// Search count of every trial, in trial order.
    pub searches: Vec<u64>,
    pub total_searches: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
    /// Nearest-rank median, same rule as [`percentile`].
    pub median: u64,
    pub mean_sweeps: f64,
    /// Mean number of tests spent on the target cell itself.
    pub mean_target_visits: f64,
    pub elapsed: Duration,
}

impl SimulationResult {
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.searches.len()
    }
}

/// Per-trial outcomes, trials run in parallel.
pub fn simulate_batch_outcomes(
    cfg: &SearchConfig,
    kind: StrategyKind,
) -> Result<Vec<TrialOutcome>, SearchError> {
    cfg.validate()?;
    let seed = cfg.seed;
    (0..cfg.num_trials)
        .into_par_iter()
        .map(|i| {
            let mut sampler = UniformSampler::new(seed.wrapping_add(i as u64));
            run_trial(cfg, kind, &mut sampler)
        })
        .collect()
}

/// Per-trial outcomes, trials run in order on one random stream.
pub fn simulate_batch_outcomes_sequential(
    cfg: &SearchConfig,
    kind: StrategyKind,
) -> Result<Vec<TrialOutcome>, SearchError> {
    cfg.validate()?;
    let mut sampler = UniformSampler::new(cfg.seed);
    (0..cfg.num_trials)
        .map(|_| run_trial(cfg, kind, &mut sampler))
        .collect()
}

pub fn simulate_batch(
    cfg: &SearchConfig,
    kind: StrategyKind,
) -> Result<SimulationResult, SearchError> {
    info!(strategy = %kind, trials = cfg.num_trials, seed = cfg.seed, "parallel batch start");
    let start = Instant::now();
    let outcomes = simulate_batch_outcomes(cfg, kind)?;
    Ok(summarize(kind, cfg.seed, &outcomes, start.elapsed()))
}

pub fn simulate_batch_sequential(
    cfg: &SearchConfig,
    kind: StrategyKind,
) -> Result<SimulationResult, SearchError> {
    info!(strategy = %kind, trials = cfg.num_trials, seed = cfg.seed, "sequential batch start");
    let start = Instant::now();
    let outcomes = simulate_batch_outcomes_sequential(cfg, kind)?;
    Ok(summarize(kind, cfg.seed, &outcomes, start.elapsed()))
}

/// Reduce trial outcomes to batch statistics.
pub fn summarize(
    kind: StrategyKind,
    seed: u64,
    outcomes: &[TrialOutcome],
    elapsed: Duration,
) -> SimulationResult {
    let n = outcomes.len();
    let searches: Vec<u64> = outcomes.iter().map(|o| o.searches).collect();
    let total_searches: u64 = searches.iter().sum();

    let (mean, std_dev, mean_sweeps, mean_target_visits, median) = if n == 0 {
        (0.0, 0.0, 0.0, 0.0, 0)
    } else {
        let mean = total_searches as f64 / n as f64;
        let variance = searches
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        let mean_sweeps = outcomes.iter().map(|o| o.sweeps as f64).sum::<f64>() / n as f64;
        let mean_target_visits =
            outcomes.iter().map(|o| o.target_visits as f64).sum::<f64>() / n as f64;
        let mut sorted = searches.clone();
        sorted.sort_unstable();
        (mean, variance.sqrt(), mean_sweeps, mean_target_visits, percentile(&sorted, 50.0))
    };

    let result = SimulationResult {
        strategy: kind,
        seed,
        min: searches.iter().copied().min().unwrap_or(0),
        max: searches.iter().copied().max().unwrap_or(0),
        searches,
        total_searches,
        mean,
        std_dev,
        median,
        mean_sweeps,
        mean_target_visits,
        elapsed,
    };
    info!(
        strategy = %kind,
        trials = n,
        total = result.total_searches,
        mean = result.mean,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch done"
    );
    result
}
