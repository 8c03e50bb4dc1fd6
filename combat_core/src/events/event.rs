//! Combat event types carried through the listener chain

use crate::status::EffectId;
use crate::types::{DamageTag, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kinds of combat events the bus routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Offense computed, mitigation not yet applied; listeners may adjust
    DamageCalculated,
    /// Mitigated damage applied to health
    DamageDealt,
    StatusApplied,
    StatusRemoved,
    EntityDeath,
}

impl EventKind {
    /// Get all event kinds
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::DamageCalculated,
            EventKind::DamageDealt,
            EventKind::StatusApplied,
            EventKind::StatusRemoved,
            EventKind::EntityDeath,
        ]
    }
}

/// Shared context carried by every combat event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatContext {
    pub attacker: EntityId,
    pub victim: EntityId,
    /// Skill that produced the event, if any
    pub skill_id: String,
    /// Skill damage coefficient
    pub coefficient: f64,
    pub tags: Vec<DamageTag>,
    /// Distance between attacker and victim at resolution time
    pub distance: f64,
    /// Free-form key/value data for listeners and scripts
    pub data: HashMap<String, serde_json::Value>,
}

impl CombatContext {
    pub fn new(attacker: EntityId, victim: EntityId) -> Self {
        CombatContext {
            attacker,
            victim,
            skill_id: String::new(),
            coefficient: 1.0,
            tags: Vec::new(),
            distance: 0.0,
            data: HashMap::new(),
        }
    }

    pub fn with_skill(mut self, skill_id: impl Into<String>, coefficient: f64) -> Self {
        self.skill_id = skill_id.into();
        self.coefficient = coefficient;
        self
    }

    pub fn with_tags(mut self, tags: Vec<DamageTag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Attach a free-form data entry
    pub fn insert_data(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }
}

/// Damage figures carried by the damage event variants
///
/// `final_damage` is the mutable result field: listeners may adjust it
/// before the caller applies it to health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageInfo {
    pub base_damage: f64,
    pub final_damage: f64,
    pub is_critical: bool,
    pub is_overpower: bool,
    pub is_vulnerable: bool,
    pub is_lucky_hit: bool,
}

/// Status condition details carried by the status event variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub effect_id: EffectId,
    pub stacks: u32,
    /// Remaining duration in ticks
    pub duration: u32,
}

/// Per-kind payload of a combat event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    DamageCalculated(DamageInfo),
    DamageDealt(DamageInfo),
    StatusApplied(StatusInfo),
    StatusRemoved(StatusInfo),
    EntityDeath,
}

/// A combat event dispatched through the bus
///
/// The same event object is passed by reference through the ordered
/// listener chain, acting as a mutable result accumulator: listeners may
/// adjust the final damage or raise the cancelled flag, and later
/// listeners observe those changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub context: CombatContext,
    pub payload: EventPayload,
    cancelled: bool,
}

impl CombatEvent {
    pub fn new(context: CombatContext, payload: EventPayload) -> Self {
        CombatEvent {
            context,
            payload,
            cancelled: false,
        }
    }

    pub fn damage_calculated(context: CombatContext, info: DamageInfo) -> Self {
        CombatEvent::new(context, EventPayload::DamageCalculated(info))
    }

    pub fn damage_dealt(context: CombatContext, info: DamageInfo) -> Self {
        CombatEvent::new(context, EventPayload::DamageDealt(info))
    }

    pub fn status_applied(context: CombatContext, info: StatusInfo) -> Self {
        CombatEvent::new(context, EventPayload::StatusApplied(info))
    }

    pub fn status_removed(context: CombatContext, info: StatusInfo) -> Self {
        CombatEvent::new(context, EventPayload::StatusRemoved(info))
    }

    pub fn entity_death(context: CombatContext) -> Self {
        CombatEvent::new(context, EventPayload::EntityDeath)
    }

    /// The kind this event routes under
    pub fn kind(&self) -> EventKind {
        match &self.payload {
            EventPayload::DamageCalculated(_) => EventKind::DamageCalculated,
            EventPayload::DamageDealt(_) => EventKind::DamageDealt,
            EventPayload::StatusApplied(_) => EventKind::StatusApplied,
            EventPayload::StatusRemoved(_) => EventKind::StatusRemoved,
            EventPayload::EntityDeath => EventKind::EntityDeath,
        }
    }

    /// Cooperative cancellation: raising the flag does not stop dispatch
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Damage figures, if this is a damage event
    pub fn damage(&self) -> Option<&DamageInfo> {
        match &self.payload {
            EventPayload::DamageCalculated(info) | EventPayload::DamageDealt(info) => Some(info),
            _ => None,
        }
    }

    /// Mutable damage figures, if this is a damage event
    pub fn damage_mut(&mut self) -> Option<&mut DamageInfo> {
        match &mut self.payload {
            EventPayload::DamageCalculated(info) | EventPayload::DamageDealt(info) => Some(info),
            _ => None,
        }
    }
}
