//! Script hook invocation contract
//!
//! The bus depends only on this named-hook abstraction, never on a
//! concrete scripting runtime. Hooks receive a serializable snapshot of
//! the event, not the live object; only the mutable result fields are
//! copied back after a hook returns.

use super::event::{CombatEvent, DamageInfo, EventKind, StatusInfo};
use crate::types::{DamageTag, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Failure inside a script hook invocation
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("No hook registered under '{0}'")]
    UnknownHook(String),
    #[error("Hook '{hook}' failed: {reason}")]
    HookFailed { hook: String, reason: String },
}

/// A detached, serializable copy of a combat event
///
/// Everything except `final_damage` and `cancelled` is informational: a
/// hook may scribble on its snapshot freely, but only those two result
/// fields survive the trip back into the live event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub kind: EventKind,
    pub attacker: EntityId,
    pub victim: EntityId,
    pub skill_id: String,
    pub coefficient: f64,
    pub tags: Vec<DamageTag>,
    pub distance: f64,
    pub data: HashMap<String, serde_json::Value>,
    pub damage: Option<DamageInfo>,
    pub status: Option<StatusInfo>,
    pub cancelled: bool,
}

impl EventSnapshot {
    /// Snapshot a live event for one hook invocation
    pub fn of(event: &CombatEvent) -> Self {
        let status = match &event.payload {
            super::event::EventPayload::StatusApplied(info)
            | super::event::EventPayload::StatusRemoved(info) => Some(info.clone()),
            _ => None,
        };
        EventSnapshot {
            kind: event.kind(),
            attacker: event.context.attacker.clone(),
            victim: event.context.victim.clone(),
            skill_id: event.context.skill_id.clone(),
            coefficient: event.context.coefficient,
            tags: event.context.tags.clone(),
            distance: event.context.distance,
            data: event.context.data.clone(),
            damage: event.damage().copied(),
            status,
            cancelled: event.is_cancelled(),
        }
    }

    /// Copy the mutable result fields back into the live event
    pub fn apply_results(&self, event: &mut CombatEvent) {
        event.set_cancelled(self.cancelled);
        if let (Some(snapshot_damage), Some(live_damage)) = (&self.damage, event.damage_mut()) {
            live_damage.final_damage = snapshot_damage.final_damage;
        }
    }
}

/// The scripting collaborator the bus invokes hooks against
pub trait ScriptHost: Send + Sync {
    /// Invoke a named hook with an event snapshot
    fn invoke(&self, hook: &str, snapshot: &mut EventSnapshot) -> Result<(), ScriptError>;
}

/// A host for callers without a scripting layer; every hook is a no-op
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScriptHost;

impl ScriptHost for NullScriptHost {
    fn invoke(&self, _hook: &str, _snapshot: &mut EventSnapshot) -> Result<(), ScriptError> {
        Ok(())
    }
}
