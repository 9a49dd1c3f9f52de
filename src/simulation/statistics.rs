//! Serializable batch summaries and the two-strategy comparison.

use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::strategy::StrategyKind;

use super::engine::{simulate_batch, simulate_batch_sequential, SimulationResult};

// ── Per-strategy summary ────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct BatchSummary {
    pub strategy: StrategyKind,
    pub num_trials: usize,
    pub seed: u64,
    pub total_searches: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
    pub median: u64,
    pub percentiles: Percentiles,
    pub mean_sweeps: f64,
    pub mean_target_visits: f64,
    pub elapsed_secs: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Percentiles {
    pub p10: u64,
    pub p25: u64,
    pub p50: u64,
    pub p75: u64,
    pub p90: u64,
    pub p99: u64,
}

/// Nearest-rank percentile of an ascending slice; 0 for an empty slice.
pub fn percentile(sorted: &[u64], pct: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

impl From<&SimulationResult> for BatchSummary {
    fn from(r: &SimulationResult) -> Self {
        let mut sorted = r.searches.clone();
        sorted.sort_unstable();
        BatchSummary {
            strategy: r.strategy,
            num_trials: r.num_trials(),
            seed: r.seed,
            total_searches: r.total_searches,
            mean: r.mean,
            std_dev: r.std_dev,
            min: r.min,
            max: r.max,
            median: r.median,
            percentiles: Percentiles {
                p10: percentile(&sorted, 10.0),
                p25: percentile(&sorted, 25.0),
                p50: percentile(&sorted, 50.0),
                p75: percentile(&sorted, 75.0),
                p90: percentile(&sorted, 90.0),
                p99: percentile(&sorted, 99.0),
            },
            mean_sweeps: r.mean_sweeps,
            mean_target_visits: r.mean_target_visits,
            elapsed_secs: r.elapsed.as_secs_f64(),
        }
    }
}

// ── Comparison ──────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct StrategyComparison {
    pub config: SearchConfig,
    pub naive: BatchSummary,
    pub bayes: BatchSummary,
    /// Bayesian mean cost over naive mean cost; below 1 means Bayesian wins.
    pub mean_ratio: f64,
}

/// Run both strategies with the same configuration and seed.
pub fn compare_strategies(
    cfg: &SearchConfig,
    sequential: bool,
) -> Result<StrategyComparison, SearchError> {
    let run = |kind| {
        if sequential {
            simulate_batch_sequential(cfg, kind)
        } else {
            simulate_batch(cfg, kind)
        }
    };
    let naive = BatchSummary::from(&run(StrategyKind::Naive)?);
    let bayes = BatchSummary::from(&run(StrategyKind::Bayesian)?);
    let mean_ratio = if naive.mean > 0.0 {
        bayes.mean / naive.mean
    } else {
        0.0
    };
    Ok(StrategyComparison {
        config: cfg.clone(),
        naive,
        bayes,
        mean_ratio,
    })
}
