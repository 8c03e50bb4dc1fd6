//! Core identifier and tag types shared across the combat engine

use serde::{Deserialize, Serialize};

/// Identifier for an entity tracked by the combat systems
///
/// The engine makes no assumption about where these come from; the host
/// server usually derives them from its own entity handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Damage-type and positional tags carried by a single attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageTag {
    // Damage types
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Shadow,
    // Delivery
    Melee,
    Ranged,
    // Positional
    Close,
    Distant,
}

impl DamageTag {
    /// Whether this tag names an elemental (non-physical) damage type
    pub fn is_elemental(&self) -> bool {
        matches!(
            self,
            DamageTag::Fire
                | DamageTag::Cold
                | DamageTag::Lightning
                | DamageTag::Poison
                | DamageTag::Shadow
        )
    }
}
