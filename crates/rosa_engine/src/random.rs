//! Random source normalization
//!
//! Gantree: L4_Integration → RandomSource

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Caller-supplied generator or seed
/// Gantree: RandomSource // 난수 생성기 또는 시드
pub enum RandomSource<'a> {
    /// Borrow the caller's generator; its state advances
    Generator(&'a mut dyn RngCore),

    /// Fresh ChaCha8 generator from a seed
    Seed(u64),
}

impl<'a> RandomSource<'a> {
    /// Normalize into a single generator
    pub fn into_rng(self) -> Box<dyn RngCore + 'a> {
        match self {
            RandomSource::Generator(rng) => Box::new(rng),
            RandomSource::Seed(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl From<u64> for RandomSource<'_> {
    fn from(seed: u64) -> Self {
        RandomSource::Seed(seed)
    }
}

impl<'a, R: RngCore> From<&'a mut R> for RandomSource<'a> {
    fn from(rng: &'a mut R) -> Self {
        RandomSource::Generator(rng)
    }
}

impl fmt::Debug for RandomSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomSource::Generator(_) => write!(f, "RandomSource::Generator"),
            RandomSource::Seed(seed) => write!(f, "RandomSource::Seed({})", seed),
        }
    }
}
