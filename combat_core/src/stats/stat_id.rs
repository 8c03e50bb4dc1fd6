//! StatId - The closed set of numeric attribute channels

use crate::types::DamageTag;
use serde::{Deserialize, Serialize};

/// A named numeric channel on an entity
///
/// The set is fixed at build time; data-driven content feeds values into
/// these channels but cannot define new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatId {
    // Offense
    WeaponDamage,
    Strength,
    Dexterity,
    Intelligence,
    Willpower,
    CritChance,
    CritDamage,
    LuckyHitChance,
    OverpowerDamage,
    VulnerableDamage,
    GlobalDamageMulti,
    // Per-type damage bonuses (additive bucket)
    PhysicalDamage,
    FireDamage,
    ColdDamage,
    LightningDamage,
    PoisonDamage,
    ShadowDamage,
    // Positional bonuses (additive bucket)
    DamageToClose,
    DamageToDistant,
    // Defense
    Armor,
    ResistanceFire,
    ResistanceCold,
    ResistanceLightning,
    ResistancePoison,
    ResistanceShadow,
    // Resources
    MaxHp,
}

impl StatId {
    /// Get all stat channels
    pub fn all() -> &'static [StatId] {
        &[
            StatId::WeaponDamage,
            StatId::Strength,
            StatId::Dexterity,
            StatId::Intelligence,
            StatId::Willpower,
            StatId::CritChance,
            StatId::CritDamage,
            StatId::LuckyHitChance,
            StatId::OverpowerDamage,
            StatId::VulnerableDamage,
            StatId::GlobalDamageMulti,
            StatId::PhysicalDamage,
            StatId::FireDamage,
            StatId::ColdDamage,
            StatId::LightningDamage,
            StatId::PoisonDamage,
            StatId::ShadowDamage,
            StatId::DamageToClose,
            StatId::DamageToDistant,
            StatId::Armor,
            StatId::ResistanceFire,
            StatId::ResistanceCold,
            StatId::ResistanceLightning,
            StatId::ResistancePoison,
            StatId::ResistanceShadow,
            StatId::MaxHp,
        ]
    }

    /// Neutral base value for this channel
    ///
    /// Every channel starts at zero except the global damage multiplier,
    /// which is a factor and must start at 1.0 or it would null every hit.
    pub fn default_base(&self) -> f64 {
        match self {
            StatId::GlobalDamageMulti => 1.0,
            _ => 0.0,
        }
    }

    /// The damage-bonus channel that applies when an attack carries `tag`,
    /// if any
    pub fn for_damage_tag(tag: DamageTag) -> Option<StatId> {
        match tag {
            DamageTag::Physical => Some(StatId::PhysicalDamage),
            DamageTag::Fire => Some(StatId::FireDamage),
            DamageTag::Cold => Some(StatId::ColdDamage),
            DamageTag::Lightning => Some(StatId::LightningDamage),
            DamageTag::Poison => Some(StatId::PoisonDamage),
            DamageTag::Shadow => Some(StatId::ShadowDamage),
            DamageTag::Close => Some(StatId::DamageToClose),
            DamageTag::Distant => Some(StatId::DamageToDistant),
            DamageTag::Melee | DamageTag::Ranged => None,
        }
    }

    /// The resistance channel guarding against an elemental tag, if any
    pub fn resistance_for_tag(tag: DamageTag) -> Option<StatId> {
        match tag {
            DamageTag::Fire => Some(StatId::ResistanceFire),
            DamageTag::Cold => Some(StatId::ResistanceCold),
            DamageTag::Lightning => Some(StatId::ResistanceLightning),
            DamageTag::Poison => Some(StatId::ResistancePoison),
            DamageTag::Shadow => Some(StatId::ResistanceShadow),
            _ => None,
        }
    }
}
