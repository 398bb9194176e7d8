//! Randomness capability trait and its implementations.
//!
//! All shuffling and random selection in the engine flows through
//! [`RandomSource`], so sessions can run on the thread RNG, replay
//! deterministically from a seed, or use a scripted stub in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource {
    /// Draw a uniform index in `0..upper`. `upper` must be non-zero.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Default source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Deterministic source seeded from a `u64`, for reproducible sessions.
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// A scripted source for testing.
///
/// Cycles through the given draws, reducing each one modulo `upper` so a
/// script never produces an out-of-range index.
#[derive(Debug)]
pub struct StubRandom {
    script: Vec<usize>,
    cursor: usize,
    draws: u32,
}

impl StubRandom {
    /// Create a stub that replays `script` (cycling when exhausted).
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            cursor: 0,
            draws: 0,
        }
    }

    /// A stub that always draws the same value.
    pub fn fixed(value: usize) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u32 {
        self.draws
    }
}

impl RandomSource for StubRandom {
    fn pick(&mut self, upper: usize) -> usize {
        self.draws += 1;
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % upper
    }
}
