//! Injectable randomness for projection generation.
//!
//! The projection generator only needs a stream of uniform samples. Hiding
//! the generator behind [`RandomSource`] lets tests seed it without touching
//! the algorithm.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed samples in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Adapter that turns any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source; the same seed always yields the same projections.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    #[must_use]
    pub fn from_os_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
