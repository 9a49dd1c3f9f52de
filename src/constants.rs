//! Search-space constants.
//!
//! The region is a line of [`NUM_CELLS`] cells. Both the target prior and the
//! naive sweep are centered on [`CENTER_CELL`].

/// Number of cells in the search region.
pub const NUM_CELLS: usize = 400;

/// Midpoint of the region: peak of the tent prior and first naive test.
pub const CENTER_CELL: usize = NUM_CELLS / 2;

/// Normalizer of the closed-form prior: (i+1)/40000 below the center,
/// (400-i)/40000 from the center up. Sums to 1.005 before renormalization.
pub const PRIOR_DENOMINATOR: f64 = 40_000.0;

/// Maximum number of tests in one sweep.
pub const SWEEP_LEN: usize = NUM_CELLS;

/// Probability that testing the occupied cell detects the target.
pub const DEFAULT_DETECTION_PROB: f64 = 0.46;

/// Number of Monte Carlo trials per batch.
pub const DEFAULT_NUM_TRIALS: usize = 10_000;

/// Upper bound on sweeps per trial. A naive sweep misses the target with
/// probability 1 - p, so this is only reached under a broken configuration.
pub const DEFAULT_MAX_SWEEPS: u32 = 10_000;

/// Tolerance for the unit-mass posterior invariant.
pub const POSTERIOR_SUM_TOLERANCE: f64 = 1e-9;
