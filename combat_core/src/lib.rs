//! combat_core - Combat resolution core for an RPG ruleset
//!
//! This library provides:
//! - StatBucket: layered per-entity attribute storage
//! - DamageResolver: offense computation and the mitigation pipeline
//! - StatusRegistry: timed status conditions under a fixed tick
//! - CombatEventBus: ordered, failure-isolated event dispatch to native
//!   listeners and script hooks

pub mod config;
pub mod damage;
pub mod defense;
pub mod events;
pub mod rng;
pub mod stats;
pub mod status;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use config::{CombatConstants, ConfigError, OverpowerBasis};
pub use damage::{DamageContext, DamageResolver, DefenseState};
pub use events::{
    CombatContext, CombatEvent, CombatEventBus, CombatListener, DamageInfo, EventKind,
    EventPayload, EventSnapshot, ListenerError, NullScriptHost, ScriptError, ScriptHost,
    StatusInfo,
};
pub use rng::{RngRoll, RollSource, SequenceRoll};
pub use stats::{StatBucket, StatId, StatValue};
pub use status::{EffectId, EffectKind, StatusEffect, StatusEffectInstance, StatusRegistry};
pub use types::{DamageTag, EntityId};
