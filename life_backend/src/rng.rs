//! Deterministic random stream for grid seeding.
//!
//! Hash-based generator: each draw is SHA-256 over (seed, counter). Seeded
//! from canister time in production and from a fixed seed in tests, so
//! `randomize` is reproducible under test.

use sha2::{Digest, Sha256};

pub struct SeedRng {
    seed: [u8; 32],
    counter: u64,
}

impl SeedRng {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seed from a timestamp (nanoseconds). The timestamp is hashed so
    /// nearby times still produce unrelated streams.
    pub fn from_timestamp(now_ns: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(now_ns.to_be_bytes());
        let seed: [u8; 32] = hasher.finalize()[0..32].try_into().unwrap();
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.counter += 1;
        let digest = hasher.finalize();
        u64::from_be_bytes(digest[0..8].try_into().unwrap())
    }

    /// True with the given probability. Compared against an integer
    /// threshold so a draw costs exactly one hash.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        let threshold = (probability * u64::MAX as f64) as u64;
        self.next_u64() < threshold
    }
}
