//! The 400-cell search region.
//!
//! A [`Grid`] lives for exactly one trial: it is built with the target
//! already placed and the posterior set to the normalized tent prior, and it
//! is dropped when the trial ends.

use crate::constants::{CENTER_CELL, NUM_CELLS, PRIOR_DENOMINATOR};
use crate::strategy::StrategyKind;

/// One cell of the region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub has_target: bool,
    /// Tests by the naive strategy in the current trial.
    pub naive_visits: u32,
    /// Tests by the Bayesian strategy in the current trial.
    pub bayes_visits: u32,
    /// Belief that the target is here. Only the Bayesian strategy reads it.
    pub posterior: f64,
}

/// Unnormalized tent prior: `(i+1)/40000` below the center,
/// `1/100 - i/40000 = (400-i)/40000` from the center up.
///
/// The second branch is written over the common denominator so that mirrored
/// cells (199 and 200, 198 and 201, ...) get bit-identical weights.
#[inline]
pub fn prior_weight(i: usize) -> f64 {
    assert!(i < NUM_CELLS, "cell index {} out of range", i);
    if i < CENTER_CELL {
        (i + 1) as f64 / PRIOR_DENOMINATOR
    } else {
        (NUM_CELLS - i) as f64 / PRIOR_DENOMINATOR
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    target: usize,
}

impl Grid {
    /// Fresh grid for one trial: counters zeroed, prior posterior, target
    /// marked. Panics if `target` is not a valid cell.
    pub fn new(target: usize) -> Self {
        assert!(target < NUM_CELLS, "target cell {} out of range", target);
        let mut cells: Vec<Cell> = (0..NUM_CELLS)
            .map(|i| Cell {
                posterior: prior_weight(i),
                ..Cell::default()
            })
            .collect();
        cells[target].has_target = true;
        let mut grid = Self { cells, target };
        // Closed form sums to 1.005
        grid.normalize_posterior();
        grid
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    #[inline]
    pub fn is_occupied(&self, i: usize) -> bool {
        self.cells[i].has_target
    }

    #[inline]
    pub fn posterior(&self, i: usize) -> f64 {
        self.cells[i].posterior
    }

    #[inline]
    pub(crate) fn set_posterior(&mut self, i: usize, value: f64) {
        self.cells[i].posterior = value;
    }

    pub fn posterior_sum(&self) -> f64 {
        self.cells.iter().map(|c| c.posterior).sum()
    }

    /// Rescale the posterior to unit mass.
    pub fn normalize_posterior(&mut self) {
        let total = self.posterior_sum();
        debug_assert!(total > 0.0, "posterior has no mass");
        for c in &mut self.cells {
            c.posterior /= total;
        }
    }

    /// Index of the largest posterior; the lowest index wins ties.
    pub fn best_cell(&self) -> usize {
        let mut best = 0;
        let mut cur_max = self.cells[0].posterior;
        for (i, c) in self.cells.iter().enumerate().skip(1) {
            if c.posterior > cur_max {
                best = i;
                cur_max = c.posterior;
            }
        }
        best
    }

    /// Count one test of cell `i` by `kind`.
    #[inline]
    pub fn record_visit(&mut self, kind: StrategyKind, i: usize) {
        let cell = &mut self.cells[i];
        match kind {
            StrategyKind::Naive => cell.naive_visits += 1,
            StrategyKind::Bayesian => cell.bayes_visits += 1,
        }
    }

    #[inline]
    pub fn visits(&self, kind: StrategyKind, i: usize) -> u32 {
        let cell = &self.cells[i];
        match kind {
            StrategyKind::Naive => cell.naive_visits,
            StrategyKind::Bayesian => cell.bayes_visits,
        }
    }

    /// Total tests recorded for `kind` across the grid.
    pub fn total_visits(&self, kind: StrategyKind) -> u64 {
        (0..NUM_CELLS).map(|i| self.visits(kind, i) as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POSTERIOR_SUM_TOLERANCE;

    #[test]
    fn test_prior_closed_form() {
        assert_eq!(prior_weight(0), 1.0 / 40_000.0);
        assert_eq!(prior_weight(199), 200.0 / 40_000.0);
        assert_eq!(prior_weight(200), 200.0 / 40_000.0);
        assert_eq!(prior_weight(399), 1.0 / 40_000.0);
        let raw: f64 = (0..NUM_CELLS).map(prior_weight).sum();
        assert!((raw - 1.005).abs() < 1e-12, "raw prior sum {}", raw);
    }

    #[test]
    fn test_prior_is_symmetric() {
        for i in 0..CENTER_CELL {
            assert_eq!(prior_weight(i), prior_weight(NUM_CELLS - 1 - i));
        }
    }

    #[test]
    fn test_new_grid_state() {
        let grid = Grid::new(123);
        assert_eq!(grid.target(), 123);
        assert_eq!(grid.cells().iter().filter(|c| c.has_target).count(), 1);
        assert!(grid.is_occupied(123));
        assert!(grid
            .cells()
            .iter()
            .all(|c| c.naive_visits == 0 && c.bayes_visits == 0));
        assert!((grid.posterior_sum() - 1.0).abs() < POSTERIOR_SUM_TOLERANCE);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_new_grid_rejects_bad_target() {
        Grid::new(NUM_CELLS);
    }

    #[test]
    fn test_best_cell_prefers_lowest_index_on_tie() {
        // 199 and 200 share the prior peak
        let grid = Grid::new(0);
        assert_eq!(grid.posterior(199), grid.posterior(200));
        assert_eq!(grid.best_cell(), 199);

        let mut grid = Grid::new(0);
        grid.set_posterior(199, 0.0);
        assert_eq!(grid.best_cell(), 200);
    }

    #[test]
    fn test_record_visit_per_kind() {
        let mut grid = Grid::new(5);
        grid.record_visit(StrategyKind::Naive, 5);
        grid.record_visit(StrategyKind::Naive, 5);
        grid.record_visit(StrategyKind::Bayesian, 7);
        assert_eq!(grid.visits(StrategyKind::Naive, 5), 2);
        assert_eq!(grid.visits(StrategyKind::Bayesian, 5), 0);
        assert_eq!(grid.visits(StrategyKind::Bayesian, 7), 1);
        assert_eq!(grid.total_visits(StrategyKind::Naive), 2);
    }
}
