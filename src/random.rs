//! Injectable randomness.
//!
//! Message selection and particle synthesis draw from a [`RandomSource`]
//! instead of a global generator, so tests can script the exact sequence of
//! values and assert exact output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty range");
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Uniform value in `[min, min + span)`.
    fn in_range(&mut self, min: f64, span: f64) -> f64 {
        min + self.next_unit() * span
    }
}

/// Production source backed by `rand`'s standard generator.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, used by `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRandom needs at least one value");
        Self { values, pos: 0 }
    }

    /// Always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 0.999_999_999)
    }
}
