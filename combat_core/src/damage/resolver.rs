//! DamageResolver - Two-phase offense and mitigation pipeline

use super::DamageContext;
use crate::config::{CombatConstants, OverpowerBasis};
use crate::defense::{armor_reduction, resistance_reduction_for_tags};
use crate::rng::RollSource;
use crate::stats::StatId;
use crate::types::DamageTag;

/// The victim-side defensive pools consumed during mitigation
///
/// Owned by the caller (usually fed from its status tracking); the
/// resolver decrements the barrier pool in place and never touches
/// health itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefenseState {
    /// Victim's current health, for the fortify threshold check
    pub current_hp: f64,
    /// Victim's stored fortify amount
    pub fortify: f64,
    /// Victim's remaining barrier pool
    pub barrier: f64,
}

/// Computes offensive damage from a stat bucket pair plus attack context,
/// then mitigates it against the victim's defenses
///
/// Crit, overpower and lucky-hit rolls consume the injected
/// [`RollSource`]; tests supply scripted sequences for deterministic
/// outcomes. Both phases are total numeric transforms: no step can fail,
/// and every reduction is explicitly capped.
pub struct DamageResolver {
    constants: CombatConstants,
    main_stat: StatId,
    rng: Box<dyn RollSource>,
}

impl DamageResolver {
    /// Create a resolver with default constants and Strength as main stat
    pub fn new(rng: Box<dyn RollSource>) -> Self {
        Self::with_constants(rng, CombatConstants::default())
    }

    /// Create a resolver with explicit constants
    pub fn with_constants(rng: Box<dyn RollSource>, constants: CombatConstants) -> Self {
        DamageResolver {
            constants,
            main_stat: StatId::Strength,
            rng,
        }
    }

    /// Configure which attribute acts as the build's main stat
    ///
    /// Class-specific stat selection lives outside this engine; the
    /// resolver only needs to know which channel to read.
    pub fn with_main_stat(mut self, main_stat: StatId) -> Self {
        self.main_stat = main_stat;
        self
    }

    /// The constants this resolver was built with
    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Offense phase: compute pre-mitigation damage for one attack
    ///
    /// Rolls crit, overpower and lucky hit (in that order) and records
    /// the outcomes on the context. Returns the raw damage before any
    /// victim-side mitigation.
    pub fn compute_offense(&mut self, ctx: &mut DamageContext<'_>) -> f64 {
        let attacker = ctx.attacker;
        let c = &self.constants;

        let base = attacker.get(StatId::WeaponDamage) * ctx.skill_coefficient;
        let main_stat_mult = 1.0 + attacker.get(self.main_stat) * c.main_stat_scale;
        let additive_mult = 1.0 + additive_bonus(ctx);
        let global_mult = attacker.get(StatId::GlobalDamageMulti);

        ctx.is_critical = self.rng.next() < attacker.get(StatId::CritChance);
        ctx.is_overpower = self.rng.next() < c.overpower_chance;
        ctx.is_lucky_hit = self.rng.next() < attacker.get(StatId::LuckyHitChance);

        let crit_mult = if ctx.is_critical { c.crit_multiplier } else { 1.0 };
        let vuln_mult = if ctx.is_vulnerable {
            c.vulnerable_multiplier
        } else {
            1.0
        };

        let mut damage =
            base * main_stat_mult * additive_mult * global_mult * crit_mult * vuln_mult;

        if ctx.is_overpower {
            let basis = match c.overpower_basis {
                OverpowerBasis::MaxHp => attacker.get(StatId::MaxHp),
                OverpowerBasis::CurrentHp => ctx.attacker_current_hp,
            };
            let overpower = (basis + ctx.attacker_fortify)
                * c.overpower_multiplier
                * (1.0 + attacker.get(StatId::OverpowerDamage));
            damage += overpower;
        }

        damage.max(0.0)
    }

    /// Mitigation phase: reduce raw damage against the victim's defenses
    ///
    /// Fixed pipeline order: armor/resistance percentage reduction, then
    /// the fortify threshold, then barrier absorption. The barrier pool
    /// in `defense` is decremented by whatever it absorbs; the return
    /// value is the damage that reaches health.
    ///
    /// The fortify threshold requires a positive stored pool: an entity
    /// with zero fortify never qualifies for the reduction, even at zero
    /// health (where a bare `fortify >= current_hp` check would pass).
    pub fn apply_mitigation(
        &self,
        ctx: &DamageContext<'_>,
        raw_damage: f64,
        attacker_level: u32,
        defense: &mut DefenseState,
    ) -> f64 {
        let armor_red = if ctx.has_tag(DamageTag::Physical) {
            armor_reduction(ctx.victim.get(StatId::Armor), attacker_level)
        } else {
            0.0
        };
        let resist_red = resistance_reduction_for_tags(ctx.victim, &ctx.tags);

        // Tags are mutually exclusive per hit for mitigation purposes;
        // max() is a fallback if a hit carries both, not a stacking rule
        let reduction = armor_red.max(resist_red);

        let mut mitigated = (raw_damage * (1.0 - reduction)).max(0.0);

        // Fortify: all-or-nothing threshold, not a gradient
        if defense.fortify > 0.0 && defense.fortify >= defense.current_hp {
            mitigated *= 1.0 - self.constants.fortify_reduction;
        }

        // Barrier absorbs last, after every percentage reduction
        let absorbed = defense.barrier.min(mitigated).max(0.0);
        defense.barrier -= absorbed;

        mitigated - absorbed
    }
}

/// Sum the additive damage bonuses that apply to this attack
///
/// Per-type and positional bonuses join when their tag is present; the
/// crit-damage and vulnerable-damage channels always join, since this
/// ruleset folds them into the additive bucket rather than treating them
/// as separate multipliers.
fn additive_bonus(ctx: &DamageContext<'_>) -> f64 {
    let mut seen: Vec<StatId> = Vec::with_capacity(ctx.tags.len() + 2);
    let mut bonus = 0.0;

    for &tag in &ctx.tags {
        if let Some(stat) = StatId::for_damage_tag(tag) {
            if !seen.contains(&stat) {
                seen.push(stat);
                bonus += ctx.attacker.get(stat);
            }
        }
    }

    bonus += ctx.attacker.get(StatId::CritDamage);
    bonus += ctx.attacker.get(StatId::VulnerableDamage);
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRoll;
    use crate::stats::StatBucket;

    fn resolver_no_procs() -> DamageResolver {
        DamageResolver::new(Box::new(SequenceRoll::never()))
    }

    #[test]
    fn test_plain_offense() {
        // weaponDamage=10, coefficient=1.0, no bonuses, procs off => 10.0
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 10.0);
        let victim = StatBucket::new();

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical]);
        let mut resolver = resolver_no_procs();

        let damage = resolver.compute_offense(&mut ctx);
        assert!((damage - 10.0).abs() < 1e-9);
        assert!(!ctx.is_critical);
        assert!(!ctx.is_overpower);
        assert!(!ctx.is_lucky_hit);
    }

    #[test]
    fn test_main_stat_scaling() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::Strength, 500.0);
        let victim = StatBucket::new();

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical]);
        let damage = resolver_no_procs().compute_offense(&mut ctx);

        // 100 * (1 + 500 * 0.001) = 150
        assert!((damage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_additive_bonuses_match_tags() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::FireDamage, 0.30);
        attacker.set_base(StatId::DamageToClose, 0.20);
        // Cold bonus should not apply to a fire hit
        attacker.set_base(StatId::ColdDamage, 0.90);
        let victim = StatBucket::new();

        let mut ctx = DamageContext::new(
            &attacker,
            &victim,
            1.0,
            vec![DamageTag::Fire, DamageTag::Close],
        );
        let damage = resolver_no_procs().compute_offense(&mut ctx);

        // 100 * (1 + 0.30 + 0.20) = 150
        assert!((damage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_crit_and_vulnerable_damage_always_additive() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::CritDamage, 0.25);
        attacker.set_base(StatId::VulnerableDamage, 0.15);
        let victim = StatBucket::new();

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical]);
        let damage = resolver_no_procs().compute_offense(&mut ctx);

        // Both channels join the additive sum even without a crit or a
        // vulnerable victim
        assert!((damage - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_forced_crit() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::CritChance, 0.5);
        let victim = StatBucket::new();

        // Crit roll passes, overpower and lucky fail
        let rolls = SequenceRoll::new(vec![0.1, 1.0, 1.0]);
        let mut resolver = DamageResolver::new(Box::new(rolls));

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical]);
        let damage = resolver.compute_offense(&mut ctx);

        assert!(ctx.is_critical);
        assert!((damage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_vulnerable_multiplier() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        let victim = StatBucket::new();

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical])
            .with_vulnerable(true);
        let damage = resolver_no_procs().compute_offense(&mut ctx);

        assert!((damage - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_forced_overpower_max_hp_basis() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::MaxHp, 1000.0);
        attacker.set_base(StatId::OverpowerDamage, 0.20);
        let victim = StatBucket::new();

        // Crit fails, overpower passes, lucky fails
        let rolls = SequenceRoll::new(vec![1.0, 0.01, 1.0]);
        let mut resolver = DamageResolver::new(Box::new(rolls));

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical])
            .with_attacker_health(400.0, 50.0);
        let damage = resolver.compute_offense(&mut ctx);

        assert!(ctx.is_overpower);
        // 100 + (1000 + 50) * 1.5 * 1.2 = 100 + 1890
        assert!((damage - 1990.0).abs() < 1e-9);
    }

    #[test]
    fn test_forced_overpower_current_hp_basis() {
        let mut attacker = StatBucket::new();
        attacker.set_base(StatId::WeaponDamage, 100.0);
        attacker.set_base(StatId::MaxHp, 1000.0);
        let victim = StatBucket::new();

        let constants = CombatConstants {
            overpower_basis: OverpowerBasis::CurrentHp,
            ..Default::default()
        };
        let rolls = SequenceRoll::new(vec![1.0, 0.01, 1.0]);
        let mut resolver = DamageResolver::with_constants(Box::new(rolls), constants);

        let mut ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical])
            .with_attacker_health(400.0, 50.0);
        let damage = resolver.compute_offense(&mut ctx);

        // 100 + (400 + 50) * 1.5 = 775
        assert!((damage - 775.0).abs() < 1e-9);
    }

    #[test]
    fn test_armor_mitigation_reference() {
        // armor=100, level=50 => reduction = 100/600; 100 raw => ~83.33
        let attacker = StatBucket::new();
        let mut victim = StatBucket::new();
        victim.set_base(StatId::Armor, 100.0);

        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Physical]);
        let mut defense = DefenseState::default();

        let reached = resolver_no_procs().apply_mitigation(&ctx, 100.0, 50, &mut defense);
        assert!((reached - 100.0 * (1.0 - 100.0 / 600.0)).abs() < 1e-9);
        assert!((reached - 83.333).abs() < 0.001);
    }

    #[test]
    fn test_resistance_mitigation() {
        let attacker = StatBucket::new();
        let mut victim = StatBucket::new();
        victim.set_base(StatId::ResistanceFire, 0.40);

        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);
        let mut defense = DefenseState::default();

        let reached = resolver_no_procs().apply_mitigation(&ctx, 100.0, 50, &mut defense);
        assert!((reached - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_capped() {
        let attacker = StatBucket::new();
        let mut victim = StatBucket::new();
        victim.set_base(StatId::ResistanceFire, 3.0);

        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);
        let mut defense = DefenseState::default();

        let reached = resolver_no_procs().apply_mitigation(&ctx, 100.0, 50, &mut defense);
        // Capped at 70% reduction
        assert!((reached - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_fortify_threshold() {
        let attacker = StatBucket::new();
        let victim = StatBucket::new();
        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);
        let resolver = resolver_no_procs();

        // Fortify meets current health: flat 15% reduction
        let mut fortified = DefenseState {
            current_hp: 100.0,
            fortify: 100.0,
            barrier: 0.0,
        };
        let reached = resolver.apply_mitigation(&ctx, 100.0, 50, &mut fortified);
        assert!((reached - 85.0).abs() < 1e-9);

        // Fortify below current health: no reduction at all
        let mut unfortified = DefenseState {
            current_hp: 100.0,
            fortify: 99.0,
            barrier: 0.0,
        };
        let reached = resolver.apply_mitigation(&ctx, 100.0, 50, &mut unfortified);
        assert!((reached - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_fortify_means_no_reduction() {
        let attacker = StatBucket::new();
        let victim = StatBucket::new();
        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);

        let mut defense = DefenseState {
            current_hp: 0.0,
            fortify: 0.0,
            barrier: 0.0,
        };
        let reached = resolver_no_procs().apply_mitigation(&ctx, 100.0, 50, &mut defense);
        assert!((reached - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_barrier_absorbs_and_depletes() {
        // barrier=30 vs mitigated 50 => barrier empties, 20 reaches health
        let attacker = StatBucket::new();
        let victim = StatBucket::new();
        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);

        let mut defense = DefenseState {
            current_hp: 500.0,
            fortify: 0.0,
            barrier: 30.0,
        };
        let reached = resolver_no_procs().apply_mitigation(&ctx, 50.0, 50, &mut defense);

        assert!((defense.barrier - 0.0).abs() < 1e-9);
        assert!((reached - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_barrier_survives_small_hit() {
        let attacker = StatBucket::new();
        let victim = StatBucket::new();
        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);

        let mut defense = DefenseState {
            current_hp: 500.0,
            fortify: 0.0,
            barrier: 100.0,
        };
        let reached = resolver_no_procs().apply_mitigation(&ctx, 40.0, 50, &mut defense);

        assert!((defense.barrier - 60.0).abs() < 1e-9);
        assert!((reached - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigated_damage_never_negative() {
        let attacker = StatBucket::new();
        let victim = StatBucket::new();
        let ctx = DamageContext::new(&attacker, &victim, 1.0, vec![DamageTag::Fire]);
        let mut defense = DefenseState::default();

        let reached = resolver_no_procs().apply_mitigation(&ctx, -50.0, 50, &mut defense);
        assert!((reached - 0.0).abs() < f64::EPSILON);
    }
}
