//! Injectable randomness for score generation.

use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// `StdRng`-backed source; reproducible when built from a seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>()
    }
}

/// Always yields the same value, clamped into `[0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(f64);

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0 - f64::EPSILON) };
        Self(value)
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.0
    }
}
