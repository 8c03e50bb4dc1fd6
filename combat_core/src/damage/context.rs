//! DamageContext - Single-attack value object

use crate::stats::StatBucket;
use crate::types::DamageTag;

/// Short-lived context for resolving one attack
///
/// Borrows the attacker's and victim's stat buckets rather than copying
/// them; created per attack and discarded afterwards. The result flags
/// are filled in during resolution.
#[derive(Debug)]
pub struct DamageContext<'a> {
    /// The attacking entity's stats
    pub attacker: &'a StatBucket,
    /// The defending entity's stats
    pub victim: &'a StatBucket,
    /// Skill damage coefficient (1.0 = 100% weapon damage)
    pub skill_coefficient: f64,
    /// Damage-type and positional tags for this attack
    pub tags: Vec<DamageTag>,
    /// Attacker's current health, for the current-HP overpower basis
    pub attacker_current_hp: f64,
    /// Attacker's stored fortify amount, added to the overpower basis
    pub attacker_fortify: f64,

    // === Result flags, filled in during resolution ===
    /// Whether the hit rolled a critical strike
    pub is_critical: bool,
    /// Whether the hit rolled an overpower proc
    pub is_overpower: bool,
    /// Whether the victim is vulnerable (supplied by the caller from its
    /// status tracking, never looked up here)
    pub is_vulnerable: bool,
    /// Whether the hit rolled a lucky hit (flag only, no damage change)
    pub is_lucky_hit: bool,
}

impl<'a> DamageContext<'a> {
    /// Create a context for one attack with all result flags cleared
    pub fn new(
        attacker: &'a StatBucket,
        victim: &'a StatBucket,
        skill_coefficient: f64,
        tags: Vec<DamageTag>,
    ) -> Self {
        DamageContext {
            attacker,
            victim,
            skill_coefficient,
            tags,
            attacker_current_hp: 0.0,
            attacker_fortify: 0.0,
            is_critical: false,
            is_overpower: false,
            is_vulnerable: false,
            is_lucky_hit: false,
        }
    }

    /// Mark the victim as vulnerable for this attack
    pub fn with_vulnerable(mut self, vulnerable: bool) -> Self {
        self.is_vulnerable = vulnerable;
        self
    }

    /// Supply the attacker's health figures for the overpower bonus
    pub fn with_attacker_health(mut self, current_hp: f64, fortify: f64) -> Self {
        self.attacker_current_hp = current_hp;
        self.attacker_fortify = fortify;
        self
    }

    /// Whether the attack carries a given tag
    pub fn has_tag(&self, tag: DamageTag) -> bool {
        self.tags.contains(&tag)
    }
}
