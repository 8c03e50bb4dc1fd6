//! RollSource - Injectable randomness capability for combat rolls
//!
//! Crit, overpower and lucky-hit rolls consume this capability instead of
//! an ambient RNG so tests can supply deterministic sequences.

use rand::Rng;

/// A source of uniform rolls in `[0, 1)`
pub trait RollSource: Send {
    /// Next roll
    fn next(&mut self) -> f64;
}

/// A [`RollSource`] backed by any sendable [`rand::Rng`]
///
/// Wraps `StdRng`, `ChaCha8Rng`, or any other owned RNG.
#[derive(Debug, Clone)]
pub struct RngRoll<R: Rng> {
    rng: R,
}

impl<R: Rng + Send> RngRoll<R> {
    pub fn new(rng: R) -> Self {
        RngRoll { rng }
    }
}

impl RngRoll<rand::rngs::StdRng> {
    /// A seeded source for reproducible simulations
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        RngRoll {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> RollSource for RngRoll<R> {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// A scripted [`RollSource`] that yields a fixed sequence
///
/// Once the sequence is exhausted it yields `1.0`, so no further
/// probability check can succeed. Useful for forcing crit/overpower
/// outcomes in tests.
#[derive(Debug, Clone, Default)]
pub struct SequenceRoll {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRoll {
    pub fn new(values: Vec<f64>) -> Self {
        SequenceRoll { values, index: 0 }
    }

    /// A source for which every probability check fails
    pub fn never() -> Self {
        SequenceRoll::new(Vec::new())
    }
}

impl RollSource for SequenceRoll {
    fn next(&mut self) -> f64 {
        let value = self.values.get(self.index).copied().unwrap_or(1.0);
        self.index += 1;
        value
    }
}
