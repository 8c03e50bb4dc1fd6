//! Armor - Physical damage reduction scaled by attacker level

use super::{ARMOR_CAP, ARMOR_LEVEL_CONSTANT};

/// Calculate the physical damage reduction fraction from armor
///
/// `reduction = armor / (armor + 10 * attacker_level)`, capped at 85%.
///
/// Scaling by attacker level keeps a fixed armor value from trivializing
/// higher-level attackers: the same armor mitigates less against a
/// stronger opponent.
///
/// # Arguments
/// * `armor` - The victim's armor value
/// * `attacker_level` - The attacking entity's level
///
/// # Returns
/// The reduction as a fraction in `[0, ARMOR_CAP]`
pub fn armor_reduction(armor: f64, attacker_level: u32) -> f64 {
    if armor <= 0.0 {
        return 0.0;
    }

    let denominator = armor + ARMOR_LEVEL_CONSTANT * attacker_level as f64;
    if denominator <= 0.0 {
        return 0.0;
    }

    (armor / denominator).min(ARMOR_CAP)
}
