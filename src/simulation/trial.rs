//! One trial: place the target, then sweep until it is detected.
//!
//! A sweep is at most [`SWEEP_LEN`] tests. A sweep that ends without a
//! detection is the normal "not found" branch: the same strategy starts a
//! new sweep on the same grid and the counts accumulate. The number of sweeps
//! is capped by [`SearchConfig::max_sweeps`]; running past the cap is a
//! [`SearchError::SweepLimitExceeded`].

use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::constants::SWEEP_LEN;
use crate::detection::DetectionModel;
use crate::error::SearchError;
use crate::grid::Grid;
use crate::sampler::{sample_target_location, UniformSampler};
use crate::strategy::{make_strategy, SearchStrategy, StrategyKind};

/// Result of one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cell where the target was detected, `None` if the sweep missed.
    pub found: Option<usize>,
    /// Tests performed in this sweep (1..=400).
    pub search_count: u32,
}

/// Result of one full trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialOutcome {
    pub target: usize,
    pub found_index: usize,
    /// Tests across all sweeps, including the successful one.
    pub searches: u64,
    pub sweeps: u32,
    /// How often the target cell itself was tested.
    pub target_visits: u32,
}

/// Run one sweep of `strategy` over `grid`.
pub fn run_sweep<S: SearchStrategy + ?Sized>(
    strategy: &mut S,
    grid: &mut Grid,
    detector: &DetectionModel,
    sampler: &mut UniformSampler,
) -> SearchOutcome {
    let kind = strategy.kind();
    strategy.begin_sweep(grid);

    for step in 0..SWEEP_LEN {
        let cell = strategy.select_next(grid);
        trace!(step, cell, strategy = %kind, "searching cell");

        grid.record_visit(kind, cell);
        let found = detector.detect(grid.is_occupied(cell), sampler);
        strategy.on_result(grid, cell, found);

        if found {
            return SearchOutcome {
                found: Some(cell),
                search_count: (step + 1) as u32,
            };
        }
    }

    SearchOutcome {
        found: None,
        search_count: SWEEP_LEN as u32,
    }
}

/// Repeat sweeps over `grid` until the target is detected.
pub fn search_until_found<S: SearchStrategy + ?Sized>(
    strategy: &mut S,
    grid: &mut Grid,
    detector: &DetectionModel,
    sampler: &mut UniformSampler,
    max_sweeps: u32,
) -> Result<TrialOutcome, SearchError> {
    let mut searches = 0u64;

    for sweep in 1..=max_sweeps {
        let outcome = run_sweep(strategy, grid, detector, sampler);
        searches += outcome.search_count as u64;

        if let Some(found_index) = outcome.found {
            return Ok(TrialOutcome {
                target: grid.target(),
                found_index,
                searches,
                sweeps: sweep,
                target_visits: grid.visits(strategy.kind(), grid.target()),
            });
        }
        debug!(sweep, searches, "sweep ended without detection, retrying");
    }

    Err(SearchError::SweepLimitExceeded {
        target: grid.target(),
        sweeps: max_sweeps,
        searches,
    })
}

/// Full trial with the target drawn from the tent prior.
pub fn run_trial(
    cfg: &SearchConfig,
    kind: StrategyKind,
    sampler: &mut UniformSampler,
) -> Result<TrialOutcome, SearchError> {
    let target = sample_target_location(sampler);
    run_trial_with_target(cfg, kind, target, sampler)
}

/// Full trial with a fixed target cell.
pub fn run_trial_with_target(
    cfg: &SearchConfig,
    kind: StrategyKind,
    target: usize,
    sampler: &mut UniformSampler,
) -> Result<TrialOutcome, SearchError> {
    let mut grid = Grid::new(target);
    debug!(target, best_cell = grid.best_cell(), strategy = %kind, "trial start");

    let detector = DetectionModel::new(cfg.detection_prob);
    let mut strategy = make_strategy(kind, cfg);
    search_until_found(strategy.as_mut(), &mut grid, &detector, sampler, cfg.max_sweeps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PosteriorUpdate;
    use crate::strategy::{naive_sweep_order, NaiveSearch};

    fn certain_cfg() -> SearchConfig {
        SearchConfig {
            detection_prob: 1.0,
            ..SearchConfig::with_seed(0)
        }
    }

    #[test]
    fn test_missed_sweep_tests_every_cell_once() {
        let mut grid = Grid::new(0);
        let detector = DetectionModel::new(1e-12);
        let mut sampler = UniformSampler::new(1);
        let mut s = NaiveSearch::new();
        let out = run_sweep(&mut s, &mut grid, &detector, &mut sampler);
        assert_eq!(out, SearchOutcome { found: None, search_count: 400 });
        assert!(grid.cells().iter().all(|c| c.naive_visits == 1));
    }

    #[test]
    fn test_certain_detector_naive_count_is_order_position() {
        let cfg = certain_cfg();
        let order = naive_sweep_order();
        for target in [200, 201, 199, 0, 399, 57] {
            let mut sampler = UniformSampler::new(9);
            let out = run_trial_with_target(&cfg, StrategyKind::Naive, target, &mut sampler).unwrap();
            let pos = order.iter().position(|&c| c == target).unwrap() as u64 + 1;
            assert_eq!(out.found_index, target);
            assert_eq!(out.searches, pos, "target {}", target);
            assert_eq!(out.sweeps, 1);
            assert_eq!(out.target_visits, 1);
        }
    }

    #[test]
    fn test_certain_detector_bayes_count_is_posterior_order() {
        // Misses zero a cell out; mirrored cells stay tied, lower index first:
        // 199, 200, 198, 201, ..., 0, 399
        for update in [PosteriorUpdate::DoubleAdjusted, PosteriorUpdate::Exact] {
            let cfg = SearchConfig {
                posterior_update: update,
                ..certain_cfg()
            };
            for (target, expected) in [(199, 1), (200, 2), (198, 3), (150, 99), (0, 399), (399, 400)] {
                let mut sampler = UniformSampler::new(9);
                let out =
                    run_trial_with_target(&cfg, StrategyKind::Bayesian, target, &mut sampler).unwrap();
                assert_eq!(out.found_index, target);
                assert_eq!(out.searches, expected, "{update}: target {}", target);
                assert_eq!(out.target_visits, 1);
            }
        }
    }

    #[test]
    fn test_sweep_limit_is_an_error() {
        let cfg = SearchConfig {
            detection_prob: 1e-12,
            max_sweeps: 2,
            ..SearchConfig::with_seed(0)
        };
        let mut sampler = UniformSampler::new(4);
        let err = run_trial_with_target(&cfg, StrategyKind::Naive, 10, &mut sampler).unwrap_err();
        match err {
            SearchError::SweepLimitExceeded {
                target,
                sweeps,
                searches,
            } => {
                assert_eq!(target, 10);
                assert_eq!(sweeps, 2);
                assert_eq!(searches, 800);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_searches_accumulate_across_sweeps() {
        let cfg = SearchConfig::with_seed(0);
        let mut sampler = UniformSampler::new(77);
        for _ in 0..200 {
            let out = run_trial(&cfg, StrategyKind::Naive, &mut sampler).unwrap();
            assert_eq!(out.found_index, out.target);
            assert!(out.searches > (out.sweeps as u64 - 1) * 400);
            assert!(out.searches <= out.sweeps as u64 * 400);
            assert_eq!(out.target_visits, out.sweeps);
        }
    }
}
