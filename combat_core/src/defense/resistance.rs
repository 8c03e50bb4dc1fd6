//! Resistance - Elemental damage mitigation with a hard cap

use super::RESISTANCE_CAP;
use crate::stats::{StatBucket, StatId};
use crate::types::DamageTag;

/// Clamp a raw resistance stat value to the usable reduction range
///
/// Resistance stats are stored as fractions (0.30 = 30% reduction) and
/// cap at 70% regardless of input magnitude. Negative resistance is
/// floored at zero rather than amplifying damage.
pub fn resistance_reduction(resistance: f64) -> f64 {
    resistance.clamp(0.0, RESISTANCE_CAP)
}

/// Resolve the resistance reduction for an attack's tag set
///
/// Tags are treated as carrying at most one elemental damage type per
/// hit; the first elemental tag present selects the resistance channel.
/// Returns `0.0` for purely physical or untyped hits.
pub fn resistance_reduction_for_tags(victim: &StatBucket, tags: &[DamageTag]) -> f64 {
    tags.iter()
        .find(|tag| tag.is_elemental())
        .and_then(|&tag| StatId::resistance_for_tag(tag))
        .map(|stat| resistance_reduction(victim.get(stat)))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_resistance() {
        assert!((resistance_reduction(0.30) - 0.30).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cap() {
        assert!((resistance_reduction(5.0) - RESISTANCE_CAP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_floored() {
        assert!((resistance_reduction(-0.50) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tag_lookup() {
        let mut victim = StatBucket::new();
        victim.set_base(StatId::ResistanceFire, 0.40);

        let reduction =
            resistance_reduction_for_tags(&victim, &[DamageTag::Fire, DamageTag::Ranged]);
        assert!((reduction - 0.40).abs() < f64::EPSILON);
    }

    #[test]
    fn test_physical_hit_has_no_resistance() {
        let victim = StatBucket::new();
        let reduction =
            resistance_reduction_for_tags(&victim, &[DamageTag::Physical, DamageTag::Melee]);
        assert!((reduction - 0.0).abs() < f64::EPSILON);
    }
}
