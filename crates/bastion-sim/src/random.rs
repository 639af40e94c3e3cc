//! Random-number source used by spawning and explosion sizing.
//!
//! Every random decision in the simulation goes through [`RandomSource`], so
//! tests can script exact outcomes and a seeded `ChaCha8Rng` replays a whole
//! mission.

use rand::Rng;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[lo, hi)`. A degenerate range returns `lo`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform index into a collection of `len` items.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick_index needs a non-empty collection");
        ((self.next_unit() * len as f64).floor() as usize).min(len - 1)
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        let samples = samples.into();
        assert!(!samples.is_empty(), "SequenceSource needs at least one sample");
        Self { samples, cursor: 0 }
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value
    }
}
