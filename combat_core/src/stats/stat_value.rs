//! StatValue - The layered modifier triple (base / additive / multiplicative)

use serde::{Deserialize, Serialize};

/// One layered stat value
///
/// Final value is calculated as:
/// `base × (1 + additive) × multiplicative`
///
/// - `base`: flat value from core attributes or equipment
/// - `additive`: sum of all signed percentage bonuses (0.20 = +20%)
/// - `multiplicative`: running product of independent multipliers
///
/// The collapsed value is cached and recomputed synchronously on every
/// mutation, so readers never observe a stale value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatValue {
    base: f64,
    additive: f64,
    multiplicative: f64,
    cached: f64,
}

impl Default for StatValue {
    fn default() -> Self {
        StatValue::with_base(0.0)
    }
}

impl StatValue {
    /// Create a new StatValue with the given base and neutral modifiers
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            additive: 0.0,
            multiplicative: 1.0,
            cached: base,
        }
    }

    /// The collapsed final value (cached)
    pub fn value(&self) -> f64 {
        self.cached
    }

    /// The base layer
    pub fn base(&self) -> f64 {
        self.base
    }

    /// The additive accumulator
    pub fn additive(&self) -> f64 {
        self.additive
    }

    /// The multiplicative accumulator
    pub fn multiplicative(&self) -> f64 {
        self.multiplicative
    }

    /// Replace the base layer
    pub fn set_base(&mut self, value: f64) {
        self.base = value;
        self.recompute();
    }

    /// Add to the base layer
    pub fn add_base(&mut self, delta: f64) {
        self.base += delta;
        self.recompute();
    }

    /// Add a signed percentage to the additive accumulator (0.20 = +20%)
    pub fn add_additive(&mut self, delta: f64) {
        self.additive += delta;
        self.recompute();
    }

    /// Fold a factor into the multiplicative accumulator (compounding)
    pub fn add_multiplicative(&mut self, factor: f64) {
        self.multiplicative *= factor;
        self.recompute();
    }

    /// Additive back to 0, multiplicative back to 1, base preserved
    pub fn reset_modifiers(&mut self) {
        self.additive = 0.0;
        self.multiplicative = 1.0;
        self.recompute();
    }

    /// Every layer back to the given base default
    pub fn reset_all(&mut self, default_base: f64) {
        self.base = default_base;
        self.additive = 0.0;
        self.multiplicative = 1.0;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.cached = self.base * (1.0 + self.additive) * self.multiplicative;
    }
}
