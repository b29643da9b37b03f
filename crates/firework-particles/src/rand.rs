//! Seedable random source for launches and bursts

use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub struct ParticleRng {
    inner: StdRng,
}

impl ParticleRng {
    /// Deterministic stream for tests and headless renders
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns a float in [min, max); `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Returns an integer in [min, max); `min` when the range is empty
    pub fn count(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Uniform index into a collection of `len` items
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Returns an angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.inner.gen_range(0.0..TAU)
    }
}
