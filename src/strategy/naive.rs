//! Naive sweep: a fixed zigzag outward from the center.
//!
//! Starting at cell 200, the running index moves by +1, -2, +3, -4, ...:
//! 200, 201, 199, 202, 198, 203, 197, ... The last offset (+400 at step
//! 399) would land on 400, one past the end; it wraps to cell 0, which is
//! the only cell the zigzag has not reached by then. One sweep therefore
//! tests every cell exactly once and ends at the far-left edge.

use crate::constants::{CENTER_CELL, NUM_CELLS, SWEEP_LEN};
use crate::grid::Grid;

use super::{SearchStrategy, StrategyKind};

/// Index after `cur` at sweep step `step` (0-based).
#[inline]
fn zigzag_step(cur: usize, step: usize) -> usize {
    let magnitude = (step + 1) as i64;
    let offset = if step % 2 == 0 { magnitude } else { -magnitude };
    (cur as i64 + offset).rem_euclid(NUM_CELLS as i64) as usize
}

/// The full visiting order of one sweep.
pub fn naive_sweep_order() -> Vec<usize> {
    let mut order = Vec::with_capacity(SWEEP_LEN);
    let mut cur = CENTER_CELL;
    for step in 0..SWEEP_LEN {
        order.push(cur);
        cur = zigzag_step(cur, step);
    }
    order
}

/// Belief-free sweep; ignores the grid's posterior entirely.
#[derive(Clone, Debug)]
pub struct NaiveSearch {
    cur: usize,
    step: usize,
}

impl NaiveSearch {
    pub fn new() -> Self {
        Self {
            cur: CENTER_CELL,
            step: 0,
        }
    }
}

impl Default for NaiveSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for NaiveSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Naive
    }

    fn begin_sweep(&mut self, _grid: &Grid) {
        self.cur = CENTER_CELL;
        self.step = 0;
    }

    fn select_next(&mut self, _grid: &Grid) -> usize {
        let cell = self.cur;
        self.cur = zigzag_step(self.cur, self.step);
        self.step += 1;
        cell
    }

    fn on_result(&mut self, _grid: &mut Grid, _index: usize, _found: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_prefix() {
        let order = naive_sweep_order();
        assert_eq!(&order[..7], &[200, 201, 199, 202, 198, 203, 197]);
    }

    #[test]
    fn test_order_is_permutation() {
        let order = naive_sweep_order();
        assert_eq!(order.len(), NUM_CELLS);
        let mut seen = [false; NUM_CELLS];
        for &c in &order {
            assert!(c < NUM_CELLS);
            assert!(!seen[c], "cell {} visited twice", c);
            seen[c] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_order_tail() {
        let order = naive_sweep_order();
        assert_eq!(&order[395..], &[398, 2, 399, 1, 0]);
    }

    #[test]
    fn test_strategy_matches_order_and_restarts() {
        let grid = Grid::new(0);
        let mut s = NaiveSearch::new();
        let expected = naive_sweep_order();
        for _ in 0..2 {
            s.begin_sweep(&grid);
            let got: Vec<usize> = (0..SWEEP_LEN).map(|_| s.select_next(&grid)).collect();
            assert_eq!(got, expected);
        }
    }
}
