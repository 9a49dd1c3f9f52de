//! Uniform draws and target placement.
//!
//! [`UniformSampler`] owns one `SmallRng` stream. Everything random in a
//! trial (target placement and detector rolls) consumes draws from the same
//! stream, in order, so a seed fully determines a trial.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::NUM_CELLS;

/// Stream of independent draws uniformly distributed on [0, 1).
#[derive(Clone, Debug)]
pub struct UniformSampler {
    rng: SmallRng,
}

impl UniformSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Next draw on [0, 1).
    #[inline(always)]
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Inverse CDF of the tent density on [0, 400), floored to a cell index.
///
/// The density rises linearly from 0 to the center and falls back to 0 at
/// the far edge. The clamp covers `u` at or extremely close to 1, where the
/// continuous inverse reaches 400.
#[inline]
pub fn tent_cell(u: f64) -> usize {
    let n = NUM_CELLS as f64;
    let x = if u <= 0.5 {
        n * (u / 2.0).sqrt()
    } else {
        n * (1.0 - ((1.0 - u) / 2.0).sqrt())
    };
    // `as` saturates: NaN and negatives map to 0
    (x.floor() as usize).min(NUM_CELLS - 1)
}

/// Place a target according to the tent prior.
#[inline]
pub fn sample_target_location(sampler: &mut UniformSampler) -> usize {
    tent_cell(sampler.next_uniform())
}
