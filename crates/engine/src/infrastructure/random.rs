//! System random source.

use rand::Rng;

use crate::infrastructure::ports::RandomPort;

/// Thread-local OS-seeded RNG behind the `RandomPort` trait.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn roll_percent(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}
