use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    fn next_int(&self, min: i64, max: i64) -> i64;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_int(&self, min: i64, max: i64) -> i64 {
        rand::rng().random_range(min..=max)
    }
}

/// Reproducible generator for tests and `--seed` runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: RefCell<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&self, min: i64, max: i64) -> i64 {
        self.rng.borrow_mut().random_range(min..=max)
    }
}
