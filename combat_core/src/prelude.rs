//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::stats::{StatBucket, StatId, StatValue};
pub use crate::types::{DamageTag, EntityId};

// Damage system
pub use crate::damage::{DamageContext, DamageResolver, DefenseState};
pub use crate::rng::{RngRoll, RollSource, SequenceRoll};

// Status conditions
pub use crate::status::{EffectId, EffectKind, StatusEffect, StatusRegistry};

// Events
pub use crate::events::{
    CombatContext, CombatEvent, CombatEventBus, CombatListener, DamageInfo, EventKind,
    ScriptHost, StatusInfo,
};

// Config
pub use crate::config::{CombatConstants, OverpowerBasis};
