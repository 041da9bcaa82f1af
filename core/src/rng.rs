//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SpinRng instances derived from the
//! single master seed the engine was built with.
//!
//! Each stream is seeded from (master_seed XOR mixed stream index).
//! An engine plays on stream 0 of its configured seed. A parallel run
//! draws a fresh master seed from that stream and gives worker i
//! stream i of it, so:
//!   - No worker replays the sequential run's stream.
//!   - Each worker's stream is fully reproducible in isolation.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG owned by exactly one engine.
#[derive(Debug, Clone)]
pub struct SpinRng {
    inner: Pcg64Mcg,
}

impl SpinRng {
    /// Create a stream from the master seed and a stable stream index.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 uniformly in [1, total]. Used for weighted reel stops.
    pub fn roll_weight(&mut self, total: u64) -> u64 {
        assert!(total > 0, "total weight must be > 0");
        self.inner.gen_range(1..=total)
    }
}

/// Hands out one independent stream per worker for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_worker(&self, worker_index: u64) -> SpinRng {
        SpinRng::new(self.master_seed, worker_index)
    }
}
