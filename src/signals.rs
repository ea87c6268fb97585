//! Placeholder signal inputs for the overall assessment.
//!
//! The seismic, ocean-current and historical-pattern factors have no real
//! model behind them. They draw from a [`SignalSource`] so the
//! deterministic parts of the assessment can be tested without randomness.
//! Values produced here are stubs, not measurements.

use rand::{rngs::StdRng, Rng, SeedableRng};

// ---

/// Source of placeholder signal values.
pub trait SignalSource {
    /// A value in `[0, upper)`.
    fn sample(&mut self, upper: f64) -> f64;
}

/// Uniformly random signals.
#[derive(Debug, Clone)]
pub struct RandomSignals {
    rng: StdRng,
}

impl RandomSignals {
    // ---
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for RandomSignals {
    fn sample(&mut self, upper: f64) -> f64 {
        // ---
        if upper <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..upper)
    }
}

/// Signals fixed at a fraction of the requested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSignals {
    fraction: f64,
}

impl FixedSignals {
    // ---
    /// `fraction` is clamped into `[0, 1)`.
    pub fn new(fraction: f64) -> Self {
        // ---
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        Self {
            fraction: fraction.clamp(0.0, 1.0 - f64::EPSILON),
        }
    }

    /// Every placeholder signal reads zero.
    pub fn zero() -> Self {
        Self::new(0.0)
    }
}

impl SignalSource for FixedSignals {
    fn sample(&mut self, upper: f64) -> f64 {
        upper.max(0.0) * self.fraction
    }
}
