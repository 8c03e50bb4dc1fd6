//! Timed status conditions with tick-driven expiry and stacking

mod effect;

pub use effect::{EffectId, EffectKind, StatusEffect, StatusEffectInstance};

use crate::types::EntityId;
use std::collections::HashMap;

/// Per-entity collection of timed status conditions
///
/// Durations are counted in discrete scheduler ticks, not wall-clock
/// time: expiry is deliberately tied to the host loop's tick rate. Once
/// an entity's last condition expires its entry is dropped entirely, so
/// memory stays bounded by the number of entities actually afflicted.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    entities: HashMap<EntityId, HashMap<EffectId, StatusEffectInstance>>,
    /// Monotonic tick counter, used as the applied-at timestamp
    current_tick: u64,
}

impl StatusRegistry {
    pub fn new() -> Self {
        StatusRegistry::default()
    }

    /// Apply a condition to an entity
    ///
    /// A fresh condition is inserted with the given duration and one
    /// stack. Reapplying refreshes: remaining duration becomes the longer
    /// of old and new (never the sum) and the stack count grows by one,
    /// silently capped at the condition's stack limit. One instance per
    /// `(entity, effect)` pair, always.
    pub fn apply(&mut self, entity: &EntityId, effect: StatusEffect) {
        let tick = self.current_tick;
        let effects = self.entities.entry(entity.clone()).or_default();
        match effects.get_mut(&effect.id) {
            Some(instance) => instance.reapply(&effect),
            None => {
                effects.insert(
                    effect.id.clone(),
                    StatusEffectInstance::from_application(&effect, tick),
                );
            }
        }
    }

    /// Advance every tracked condition by one scheduler tick
    ///
    /// Conditions whose remaining duration reaches zero are removed;
    /// entities left with no conditions are dropped from the registry.
    pub fn tick(&mut self) {
        self.current_tick += 1;
        for effects in self.entities.values_mut() {
            effects.retain(|_, instance| {
                instance.remaining = instance.remaining.saturating_sub(1);
                instance.remaining > 0
            });
        }
        self.entities.retain(|_, effects| !effects.is_empty());
    }

    /// Sum damage-over-time output for one entity
    ///
    /// Intended for a coarser cadence than [`StatusRegistry::tick`]
    /// (roughly once per host second). Sums `magnitude * stacks` over
    /// every recognized damaging condition; reads state, never mutates
    /// it.
    pub fn process_dot(&self, entity: &EntityId) -> f64 {
        self.entities
            .get(entity)
            .map(|effects| {
                effects
                    .iter()
                    .filter(|(id, _)| id.is_damage_over_time())
                    .map(|(_, instance)| instance.magnitude * instance.stacks as f64)
                    .sum()
            })
            .unwrap_or(0.0)
    }

    // === Query predicates ===

    /// Whether a condition is active on an entity
    pub fn has_effect(&self, entity: &EntityId, id: &EffectId) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|effects| effects.contains_key(id))
    }

    /// Whether the entity takes increased incoming damage
    pub fn is_vulnerable(&self, entity: &EntityId) -> bool {
        self.has_effect(entity, &EffectId::Vulnerable)
    }

    /// Whether the entity currently holds fortify
    pub fn is_fortified(&self, entity: &EntityId) -> bool {
        self.has_effect(entity, &EffectId::Fortified)
    }

    /// Whether the entity cannot act (stunned or frozen)
    pub fn is_incapacitated(&self, entity: &EntityId) -> bool {
        self.has_effect(entity, &EffectId::Stunned) || self.has_effect(entity, &EffectId::Frozen)
    }

    /// Whether any crowd-control condition is active on the entity
    pub fn has_crowd_control(&self, entity: &EntityId) -> bool {
        self.entities.get(entity).is_some_and(|effects| {
            effects
                .values()
                .any(|instance| instance.kind == EffectKind::CrowdControl)
        })
    }

    /// The live instance of a condition, if active
    pub fn effect(&self, entity: &EntityId, id: &EffectId) -> Option<&StatusEffectInstance> {
        self.entities.get(entity).and_then(|effects| effects.get(id))
    }

    /// Iterate an entity's active conditions (for UI/telemetry)
    pub fn effects(
        &self,
        entity: &EntityId,
    ) -> impl Iterator<Item = (&EffectId, &StatusEffectInstance)> {
        self.entities.get(entity).into_iter().flatten()
    }

    /// Number of entities currently tracked
    pub fn tracked_entities(&self) -> usize {
        self.entities.len()
    }

    /// The registry's monotonic tick counter
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    // === Explicit removal outside the tick cycle ===

    /// Remove one condition from an entity
    pub fn remove(&mut self, entity: &EntityId, id: &EffectId) {
        if let Some(effects) = self.entities.get_mut(entity) {
            effects.remove(id);
            if effects.is_empty() {
                self.entities.remove(entity);
            }
        }
    }

    /// Remove every condition from an entity
    pub fn clear(&mut self, entity: &EntityId) {
        self.entities.remove(entity);
    }

    /// Drop entities the caller no longer tracks (e.g. despawned)
    ///
    /// Returns how many entities were removed.
    pub fn cleanup(&mut self, mut is_stale: impl FnMut(&EntityId) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|entity, _| !is_stale(entity));
        before - self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> EntityId {
        EntityId::from(name)
    }

    #[test]
    fn test_apply_and_query() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::vulnerable(100));
        assert!(registry.is_vulnerable(&target));
        assert!(!registry.is_fortified(&target));
        assert!(registry.has_effect(&target, &EffectId::Vulnerable));
    }

    #[test]
    fn test_refresh_takes_longer_duration() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::vulnerable(100));
        registry.apply(&target, StatusEffect::vulnerable(60));

        let instance = registry.effect(&target, &EffectId::Vulnerable).unwrap();
        assert_eq!(instance.remaining, 100);
    }

    #[test]
    fn test_stacking_caps_silently() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        for _ in 0..8 {
            registry.apply(&target, StatusEffect::bleed(50, 12.0));
        }

        let instance = registry.effect(&target, &EffectId::Bleeding).unwrap();
        assert_eq!(instance.stacks, 5);
    }

    #[test]
    fn test_tick_expiry_and_entity_drop() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::stun(1));
        assert_eq!(registry.tracked_entities(), 1);

        registry.tick();
        assert!(!registry.is_incapacitated(&target));
        assert_eq!(registry.tracked_entities(), 0);
    }

    #[test]
    fn test_vulnerable_full_lifecycle() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::vulnerable(100));
        assert!(registry.is_vulnerable(&target));

        for _ in 0..99 {
            registry.tick();
        }
        assert!(registry.is_vulnerable(&target));

        registry.tick();
        assert!(!registry.is_vulnerable(&target));
        assert_eq!(registry.tracked_entities(), 0);
    }

    #[test]
    fn test_process_dot_sums_stacked_magnitudes() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::bleed(100, 10.0));
        registry.apply(&target, StatusEffect::bleed(100, 10.0));
        registry.apply(&target, StatusEffect::burn(100, 7.0));
        // Non-damaging conditions contribute nothing
        registry.apply(&target, StatusEffect::vulnerable(100));

        // 10 * 2 stacks + 7 * 1 stack
        assert!((registry.process_dot(&target) - 27.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_process_dot_does_not_mutate() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");
        registry.apply(&target, StatusEffect::poison(10, 5.0));

        registry.process_dot(&target);
        registry.process_dot(&target);
        let instance = registry.effect(&target, &EffectId::Poisoned).unwrap();
        assert_eq!(instance.remaining, 10);
    }

    #[test]
    fn test_incapacitated_covers_stun_and_freeze() {
        let mut registry = StatusRegistry::new();
        let stunned = entity("a");
        let frozen = entity("b");
        let chilled = entity("c");

        registry.apply(&stunned, StatusEffect::stun(10));
        registry.apply(&frozen, StatusEffect::freeze(10));
        registry.apply(&chilled, StatusEffect::chill(10, 0.4));

        assert!(registry.is_incapacitated(&stunned));
        assert!(registry.is_incapacitated(&frozen));
        assert!(!registry.is_incapacitated(&chilled));

        assert!(registry.has_crowd_control(&stunned));
        assert!(registry.has_crowd_control(&frozen));
        assert!(!registry.has_crowd_control(&chilled));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.apply(&target, StatusEffect::vulnerable(100));
        registry.apply(&target, StatusEffect::stun(100));

        registry.remove(&target, &EffectId::Vulnerable);
        assert!(!registry.is_vulnerable(&target));
        assert!(registry.is_incapacitated(&target));

        registry.clear(&target);
        assert_eq!(registry.tracked_entities(), 0);
    }

    #[test]
    fn test_cleanup_by_predicate() {
        let mut registry = StatusRegistry::new();
        registry.apply(&entity("keep"), StatusEffect::vulnerable(100));
        registry.apply(&entity("stale_1"), StatusEffect::vulnerable(100));
        registry.apply(&entity("stale_2"), StatusEffect::stun(100));

        let removed = registry.cleanup(|id| id.0.starts_with("stale"));
        assert_eq!(removed, 2);
        assert_eq!(registry.tracked_entities(), 1);
        assert!(registry.is_vulnerable(&entity("keep")));
    }

    #[test]
    fn test_applied_at_timestamp() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");

        registry.tick();
        registry.tick();
        registry.apply(&target, StatusEffect::vulnerable(100));

        let instance = registry.effect(&target, &EffectId::Vulnerable).unwrap();
        assert_eq!(instance.applied_at, 2);
    }

    #[test]
    fn test_custom_effect_id() {
        let mut registry = StatusRegistry::new();
        let target = entity("mob_1");
        let brand = EffectId::Custom("shrine_brand".to_string());

        registry.apply(
            &target,
            StatusEffect::new(brand.clone(), EffectKind::Buff, 40).with_magnitude(2.0),
        );
        assert!(registry.has_effect(&target, &brand));
        assert!(!registry.has_crowd_control(&target));
    }
}
