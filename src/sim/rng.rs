//! Injectable randomness
//!
//! Crash rolls and food placement draw from separate sources so either can be
//! seeded (or scripted) on its own.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform random numbers for the simulation
pub trait RandomSource {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in [0, bound). `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

/// Seeds for the two simulation streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub crash_seed: u64,
    pub food_seed: u64,
}

impl RngState {
    /// Derive both stream seeds from one session seed
    pub fn new(seed: u64) -> Self {
        Self {
            crash_seed: seed,
            food_seed: seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17) ^ 0xF00D,
        }
    }

    pub fn crash_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.crash_seed)
    }

    pub fn food_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.food_seed)
    }
}

/// Replays a fixed list of unit samples, then repeats the last one.
/// Integer draws come from the same list, scaled to the bound.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(samples: Vec<f64>) -> Self {
        assert!(!samples.is_empty(), "scripted source needs at least one sample");
        Self { samples, index: 0 }
    }

    /// `quiet` draws of `before`, then `after` forever
    pub fn switch_after(quiet: usize, before: f64, after: f64) -> Self {
        let mut samples = vec![before; quiet];
        samples.push(after);
        Self::new(samples)
    }

    /// Number of samples drawn so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let i = self.index.min(self.samples.len() - 1);
        self.index += 1;
        self.samples[i]
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        let unit = self.next_unit().clamp(0.0, 1.0);
        ((unit * bound as f64) as u32).min(bound.saturating_sub(1))
    }
}
