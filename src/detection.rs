//! Imperfect detector: testing the occupied cell succeeds with probability p.

use tracing::trace;

use crate::sampler::UniformSampler;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionModel {
    prob: f64,
}

impl DetectionModel {
    pub fn new(prob: f64) -> Self {
        Self { prob }
    }

    /// Success probability on the occupied cell.
    #[inline]
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Outcome for a given draw `u` on [0, 1): detected iff the cell is
    /// occupied and `u < p`.
    #[inline]
    pub fn detect_with_draw(&self, occupied: bool, u: f64) -> bool {
        occupied && u < self.prob
    }

    /// Test one cell. Always consumes exactly one draw so the stream stays
    /// aligned regardless of where the target is.
    pub fn detect(&self, occupied: bool, sampler: &mut UniformSampler) -> bool {
        let u = sampler.next_uniform();
        let found = self.detect_with_draw(occupied, u);
        if occupied {
            trace!(need_below = self.prob, roll = u, found, "testing the occupied cell");
        }
        found
    }
}
