//! Random byte sources.
//!
//! Salts and IVs are drawn through the `RandomBytes` trait so the vault
//! can be driven by a deterministic generator in tests.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A source of random bytes for salts and IVs.
pub trait RandomBytes {
    /// Fill `buf` entirely with random bytes.
    fn fill(&mut self, buf: &mut [u8]);
}

/// Cryptographically secure randomness from the thread-local CSPRNG
/// (seeded from the operating system).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomBytes for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) {
        rand::rng().fill_bytes(buf);
    }
}

/// Deterministic randomness for tests and reproducible fixtures.
///
/// Never use this for a real vault: the same seed always produces the
/// same salts and IVs.
#[derive(Debug, Clone)]
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

impl RandomBytes for SeededRandom {
    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}
