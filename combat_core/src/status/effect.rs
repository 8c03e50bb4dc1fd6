//! Status effect identifiers and application descriptors

use serde::{Deserialize, Serialize};

/// Broad classification of a status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Buff,
    Debuff,
    CrowdControl,
}

/// Identifier for a status condition
///
/// The built-in conditions are a closed set so the common path stays
/// type-safe; `Custom` is the escape hatch for data-driven content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    Vulnerable,
    Fortified,
    Stunned,
    Frozen,
    Chilled,
    Slowed,
    Bleeding,
    Burning,
    Poisoned,
    Custom(String),
}

impl EffectId {
    /// Whether this condition deals damage over time
    pub fn is_damage_over_time(&self) -> bool {
        matches!(
            self,
            EffectId::Bleeding | EffectId::Burning | EffectId::Poisoned
        )
    }
}

/// An application of a status condition to an entity
///
/// Describes what to apply; the registry owns the resulting
/// [`StatusEffectInstance`] and its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Which condition
    pub id: EffectId,
    /// Classification
    pub kind: EffectKind,
    /// Duration in scheduler ticks
    pub duration: u32,
    /// Stack cap for repeated applications
    pub max_stacks: u32,
    /// Effect magnitude (DoT damage per cadence for damaging conditions,
    /// slow fraction for movement conditions, ...)
    pub magnitude: f64,
}

impl StatusEffect {
    /// Create an application with a single allowed stack
    pub fn new(id: EffectId, kind: EffectKind, duration: u32) -> Self {
        StatusEffect {
            id,
            kind,
            duration,
            max_stacks: 1,
            magnitude: 0.0,
        }
    }

    /// Set the stack cap
    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks;
        self
    }

    /// Set the magnitude
    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    // === Built-in conditions ===

    pub fn vulnerable(duration: u32) -> Self {
        StatusEffect::new(EffectId::Vulnerable, EffectKind::Debuff, duration)
    }

    pub fn fortified(duration: u32, amount: f64) -> Self {
        StatusEffect::new(EffectId::Fortified, EffectKind::Buff, duration).with_magnitude(amount)
    }

    pub fn stun(duration: u32) -> Self {
        StatusEffect::new(EffectId::Stunned, EffectKind::CrowdControl, duration)
    }

    pub fn freeze(duration: u32) -> Self {
        StatusEffect::new(EffectId::Frozen, EffectKind::CrowdControl, duration)
    }

    pub fn chill(duration: u32, slow: f64) -> Self {
        StatusEffect::new(EffectId::Chilled, EffectKind::Debuff, duration).with_magnitude(slow)
    }

    pub fn slow(duration: u32, slow: f64) -> Self {
        StatusEffect::new(EffectId::Slowed, EffectKind::Debuff, duration).with_magnitude(slow)
    }

    pub fn bleed(duration: u32, damage: f64) -> Self {
        StatusEffect::new(EffectId::Bleeding, EffectKind::Debuff, duration)
            .with_max_stacks(5)
            .with_magnitude(damage)
    }

    pub fn burn(duration: u32, damage: f64) -> Self {
        StatusEffect::new(EffectId::Burning, EffectKind::Debuff, duration)
            .with_max_stacks(3)
            .with_magnitude(damage)
    }

    pub fn poison(duration: u32, damage: f64) -> Self {
        StatusEffect::new(EffectId::Poisoned, EffectKind::Debuff, duration)
            .with_max_stacks(5)
            .with_magnitude(damage)
    }
}

/// A live status condition tracked on one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    /// Classification
    pub kind: EffectKind,
    /// Remaining duration in ticks
    pub remaining: u32,
    /// Longest duration seen across applications
    pub max_duration: u32,
    /// Current stack count (1..=max_stacks)
    pub stacks: u32,
    /// Stack cap
    pub max_stacks: u32,
    /// Effect magnitude per stack
    pub magnitude: f64,
    /// Registry tick at which the condition was first applied
    pub applied_at: u64,
}

impl StatusEffectInstance {
    pub(crate) fn from_application(effect: &StatusEffect, applied_at: u64) -> Self {
        StatusEffectInstance {
            kind: effect.kind,
            remaining: effect.duration,
            max_duration: effect.duration,
            stacks: 1,
            max_stacks: effect.max_stacks.max(1),
            magnitude: effect.magnitude,
            applied_at,
        }
    }

    /// Fold a reapplication into this instance
    ///
    /// Refresh takes the longer of the two durations, never the sum;
    /// stacks cap silently at `max_stacks`.
    pub(crate) fn reapply(&mut self, effect: &StatusEffect) {
        self.remaining = self.remaining.max(effect.duration);
        self.max_duration = self.max_duration.max(effect.duration);
        self.stacks = (self.stacks + 1).min(self.max_stacks);
        self.magnitude = effect.magnitude;
    }
}
