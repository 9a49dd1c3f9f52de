//! Bayesian search: always test the cell most likely to hold the target.
//!
//! A failed test at cell k with posterior q is evidence against k. The
//! update depends on [`PosteriorUpdate`]:
//!
//! - `DoubleAdjusted`: `q' = (1-p)q / (1-pq)` at k, then
//!   `x'' = x' / (1-px')` at every cell including k, rescaled to unit mass.
//! - `Exact`: `q' = (1-p)q / (1-pq)` at k and `x' = x / (1-pq)` elsewhere,
//!   which keeps unit mass without rescaling.
//!
//! Nothing stops a cell that was just tested from being selected again: its
//! posterior drops, but it stays the argmax if everything else is lower.

use tracing::trace;

use crate::config::PosteriorUpdate;
use crate::constants::NUM_CELLS;
use crate::grid::Grid;

use super::{SearchStrategy, StrategyKind};

#[derive(Clone, Debug)]
pub struct BayesianSearch {
    prob: f64,
    update: PosteriorUpdate,
}

impl BayesianSearch {
    pub fn new(prob: f64, update: PosteriorUpdate) -> Self {
        Self { prob, update }
    }
}

impl SearchStrategy for BayesianSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bayesian
    }

    fn select_next(&mut self, grid: &Grid) -> usize {
        grid.best_cell()
    }

    fn on_result(&mut self, grid: &mut Grid, index: usize, found: bool) {
        if !found {
            apply_failed_test(grid, index, self.prob, self.update);
            trace!(
                tested = index,
                posterior = grid.posterior(index),
                best = grid.best_cell(),
                "posterior updated"
            );
        }
    }
}

/// Revise the posterior after testing `index` without detecting the target.
pub fn apply_failed_test(grid: &mut Grid, index: usize, p: f64, update: PosteriorUpdate) {
    let q = grid.posterior(index);
    let miss = 1.0 - p * q;
    grid.set_posterior(index, (1.0 - p) * q / miss);

    match update {
        PosteriorUpdate::DoubleAdjusted => {
            for i in 0..NUM_CELLS {
                let x = grid.posterior(i);
                grid.set_posterior(i, x / (1.0 - p * x));
            }
            grid.normalize_posterior();
        }
        PosteriorUpdate::Exact => {
            for i in (0..NUM_CELLS).filter(|&i| i != index) {
                let x = grid.posterior(i);
                grid.set_posterior(i, x / miss);
            }
        }
    }
}
