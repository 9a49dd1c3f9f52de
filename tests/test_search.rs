//! End-to-end trials and batches through the public API.

use subsearch::config::{PosteriorUpdate, SearchConfig};
use subsearch::constants::{NUM_CELLS, POSTERIOR_SUM_TOLERANCE};
use subsearch::detection::DetectionModel;
use subsearch::grid::Grid;
use subsearch::sampler::UniformSampler;
use subsearch::simulation::{
    run_sweep, run_trial_with_target, simulate_batch, simulate_batch_sequential,
};
use subsearch::strategy::{naive_sweep_order, BayesianSearch, NaiveSearch, StrategyKind};

fn cfg(num_trials: usize, seed: u64) -> SearchConfig {
    SearchConfig {
        num_trials,
        ..SearchConfig::with_seed(seed)
    }
}

// ── Edge targets ─────────────────────────────────────────────────────

#[test]
fn naive_finds_target_at_left_edge() {
    let cfg = cfg(1, 0);
    for seed in 0..50 {
        let mut sampler = UniformSampler::new(seed);
        let out = run_trial_with_target(&cfg, StrategyKind::Naive, 0, &mut sampler).unwrap();
        assert_eq!(out.found_index, 0);
        // Cell 0 is the last cell of every sweep
        assert_eq!(out.searches, out.sweeps as u64 * NUM_CELLS as u64);
    }
}

#[test]
fn bayes_finds_target_at_either_edge() {
    let cfg = cfg(1, 0);
    for target in [0, NUM_CELLS - 1] {
        let mut sampler = UniformSampler::new(target as u64);
        let out = run_trial_with_target(&cfg, StrategyKind::Bayesian, target, &mut sampler).unwrap();
        assert_eq!(out.found_index, target);
        assert!(out.target_visits >= 1);
    }
}

// ── Deterministic detector ───────────────────────────────────────────

#[test]
fn certain_detector_naive_first_test_at_center() {
    let cfg = SearchConfig {
        detection_prob: 1.0,
        ..cfg(1, 0)
    };
    let mut sampler = UniformSampler::new(1);
    let out = run_trial_with_target(&cfg, StrategyKind::Naive, 200, &mut sampler).unwrap();
    assert_eq!((out.found_index, out.searches), (200, 1));
}

#[test]
fn certain_detector_count_is_order_position_for_every_cell() {
    let cfg = SearchConfig {
        detection_prob: 1.0,
        ..cfg(1, 0)
    };
    let order = naive_sweep_order();
    let mut sampler = UniformSampler::new(5);
    for (pos, &target) in order.iter().enumerate() {
        let out = run_trial_with_target(&cfg, StrategyKind::Naive, target, &mut sampler).unwrap();
        assert_eq!(out.searches, pos as u64 + 1);
    }
}

// ── Sweep invariants ─────────────────────────────────────────────────

#[test]
fn bayes_sweep_keeps_unit_mass_and_counts_visits() {
    let mut grid = Grid::new(17);
    let detector = DetectionModel::new(0.46);
    let mut sampler = UniformSampler::new(123);
    let mut s = BayesianSearch::new(0.46, PosteriorUpdate::DoubleAdjusted);
    let out = run_sweep(&mut s, &mut grid, &detector, &mut sampler);

    assert!((grid.posterior_sum() - 1.0).abs() < POSTERIOR_SUM_TOLERANCE);
    assert_eq!(
        grid.total_visits(StrategyKind::Bayesian),
        out.search_count as u64
    );
    assert_eq!(grid.total_visits(StrategyKind::Naive), 0);
}

#[test]
fn naive_sweep_visit_counts_match_search_count() {
    let mut grid = Grid::new(350);
    let detector = DetectionModel::new(0.46);
    let mut sampler = UniformSampler::new(8);
    let mut s = NaiveSearch::new();
    let out = run_sweep(&mut s, &mut grid, &detector, &mut sampler);
    assert_eq!(grid.total_visits(StrategyKind::Naive), out.search_count as u64);
    assert!(grid.cells().iter().all(|c| c.naive_visits <= 1));
}

// ── Monte Carlo driver ───────────────────────────────────────────────

#[test]
fn same_seed_same_total() {
    let cfg = cfg(300, 2026);
    for kind in StrategyKind::ALL {
        assert_eq!(
            simulate_batch(&cfg, kind).unwrap().total_searches,
            simulate_batch(&cfg, kind).unwrap().total_searches
        );
        assert_eq!(
            simulate_batch_sequential(&cfg, kind).unwrap().total_searches,
            simulate_batch_sequential(&cfg, kind).unwrap().total_searches
        );
    }
}

#[test]
fn different_seeds_differ() {
    let a = simulate_batch(&cfg(300, 1), StrategyKind::Naive).unwrap();
    let b = simulate_batch(&cfg(300, 10_000), StrategyKind::Naive).unwrap();
    assert_ne!(a.searches, b.searches);
}

#[test]
fn naive_mean_near_theory() {
    // E[cost] = E[sweep position of target] + 400 (1-p)/p ≈ 134 + 470
    let r = simulate_batch(&cfg(4000, 99), StrategyKind::Naive).unwrap();
    assert!(r.mean > 540.0 && r.mean < 670.0, "naive mean {:.1}", r.mean);
}
