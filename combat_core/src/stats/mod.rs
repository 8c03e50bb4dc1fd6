//! Layered per-entity attribute storage

mod stat_id;
mod stat_value;

pub use stat_id::StatId;
pub use stat_value::StatValue;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-entity layered attribute storage
///
/// Owns exactly one [`StatValue`] per [`StatId`] for one entity. Every
/// known channel is pre-populated at construction with neutral defaults,
/// so [`StatBucket::get`] is always a plain cached read with no special
/// case for untouched channels.
///
/// Equipment, skill trees and similar collaborators feed modifiers in
/// through the mutators; this type makes no assumption about where the
/// values came from and performs no validation on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBucket {
    values: HashMap<StatId, StatValue>,
}

impl Default for StatBucket {
    fn default() -> Self {
        Self::new()
    }
}

impl StatBucket {
    /// Create a bucket with every channel at its neutral default
    pub fn new() -> Self {
        let values = StatId::all()
            .iter()
            .map(|&id| (id, StatValue::with_base(id.default_base())))
            .collect();
        StatBucket { values }
    }

    /// The cached final value for a channel
    pub fn get(&self, id: StatId) -> f64 {
        self.values.get(&id).map(|v| v.value()).unwrap_or(0.0)
    }

    /// The full layered value for a channel
    pub fn value(&self, id: StatId) -> &StatValue {
        // Channels are pre-populated in new(); the entry always exists
        &self.values[&id]
    }

    /// Replace the base layer of a channel
    pub fn set_base(&mut self, id: StatId, value: f64) {
        self.entry(id).set_base(value);
    }

    /// Add to the base layer of a channel
    pub fn add_base(&mut self, id: StatId, delta: f64) {
        self.entry(id).add_base(delta);
    }

    /// Add a signed percentage to a channel's additive accumulator
    pub fn add_additive(&mut self, id: StatId, delta: f64) {
        self.entry(id).add_additive(delta);
    }

    /// Fold a factor into a channel's multiplicative accumulator
    pub fn add_multiplicative(&mut self, id: StatId, factor: f64) {
        self.entry(id).add_multiplicative(factor);
    }

    /// Reset every channel's modifiers, preserving bases
    ///
    /// Used when re-deriving bonuses from equipment while keeping core
    /// attributes.
    pub fn reset_modifiers(&mut self) {
        for value in self.values.values_mut() {
            value.reset_modifiers();
        }
    }

    /// Reset every channel back to its neutral default
    pub fn reset_all(&mut self) {
        for (id, value) in self.values.iter_mut() {
            value.reset_all(id.default_base());
        }
    }

    fn entry(&mut self, id: StatId) -> &mut StatValue {
        self.values
            .entry(id)
            .or_insert_with(|| StatValue::with_base(id.default_base()))
    }
}
