//! Random draws for the simulation
//!
//! Every random decision goes through [`RandomSource`] so a run can be replayed
//! from a seed, or from an exact list of draws in tests.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Largest `f32` below 1.0
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator used by hosts
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
///
/// Draws are clamped into `[0, 1)` so any scripted value is in range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
        }
    }

    /// Number of scripted draws not consumed yet
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let draw = self.draws.pop_front().unwrap_or(self.fallback);
        if draw.is_nan() {
            return 0.0;
        }
        draw.clamp(0.0, BELOW_ONE)
    }
}
