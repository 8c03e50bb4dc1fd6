//! Example Game - A minimal console battle demonstrating combat_core
//!
//! This simulation shows:
//! - Seeding stat buckets the way an equipment collaborator would
//! - The per-attack pipeline: offense -> pre-mitigation event ->
//!   mitigation -> health write -> post event
//! - Status conditions under the fixed tick, with DoT sampled at a
//!   coarser cadence
//! - Native listeners and a tiny in-process script host on the bus

use combat_core::prelude::*;
use combat_core::events::{EventSnapshot, ScriptError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Host ticks per "second" of game time
const TICKS_PER_SECOND: u32 = 20;
/// How often each combatant swings
const ATTACK_INTERVAL: u32 = 15;

/// One combatant's mutable battle state; the engine itself never owns
/// health or barrier pools
struct Combatant {
    id: EntityId,
    level: u32,
    stats: StatBucket,
    current_hp: f64,
    barrier: f64,
    fortify: f64,
    skill: (&'static str, f64, Vec<DamageTag>),
}

impl Combatant {
    fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }
}

fn make_barbarian() -> Combatant {
    let mut stats = StatBucket::new();
    stats.set_base(StatId::WeaponDamage, 120.0);
    stats.set_base(StatId::Strength, 300.0);
    stats.set_base(StatId::MaxHp, 900.0);
    stats.set_base(StatId::CritChance, 0.25);
    stats.set_base(StatId::CritDamage, 0.40);
    stats.set_base(StatId::Armor, 350.0);
    // A two-handed weapon affix and a shrine buff, as equipment would
    // apply them
    stats.add_additive(StatId::PhysicalDamage, 0.30);
    stats.add_multiplicative(StatId::GlobalDamageMulti, 1.15);

    Combatant {
        id: EntityId::from("barbarian"),
        level: 60,
        stats,
        current_hp: 900.0,
        barrier: 0.0,
        fortify: 450.0,
        skill: ("whirlwind", 0.8, vec![DamageTag::Physical, DamageTag::Melee]),
    }
}

fn make_butcher() -> Combatant {
    let mut stats = StatBucket::new();
    stats.set_base(StatId::WeaponDamage, 95.0);
    stats.set_base(StatId::Strength, 220.0);
    stats.set_base(StatId::MaxHp, 2200.0);
    stats.set_base(StatId::CritChance, 0.05);
    stats.set_base(StatId::Armor, 500.0);
    stats.set_base(StatId::ResistanceFire, 0.30);

    Combatant {
        id: EntityId::from("butcher"),
        level: 62,
        stats,
        current_hp: 2200.0,
        barrier: 300.0,
        fortify: 0.0,
        skill: ("cleave", 1.2, vec![DamageTag::Physical, DamageTag::Close]),
    }
}

/// A stand-in scripting runtime: hooks are plain Rust closures keyed by
/// name, invoked against event snapshots exactly like external scripts
struct DemoScriptHost;

impl ScriptHost for DemoScriptHost {
    fn invoke(&self, hook: &str, snapshot: &mut EventSnapshot) -> Result<(), ScriptError> {
        match hook {
            "on_damage_dealt" => {
                if let Some(damage) = snapshot.damage {
                    if damage.is_overpower {
                        println!(
                            "    [script] {} overpowered {} for {:.0}!",
                            snapshot.attacker, snapshot.victim, damage.final_damage
                        );
                    }
                }
                Ok(())
            }
            "soften_killing_blows" => {
                // A mercy rule: cap any single post-mitigation hit
                if let Some(damage) = snapshot.damage.as_mut() {
                    if damage.final_damage > 600.0 {
                        damage.final_damage = 600.0;
                    }
                }
                Ok(())
            }
            other => Err(ScriptError::UnknownHook(other.to_string())),
        }
    }
}

fn wire_bus() -> CombatEventBus {
    let bus = CombatEventBus::new();

    bus.register_global(|event: &mut CombatEvent| {
        if event.kind() == EventKind::EntityDeath {
            println!("    {} has fallen!", event.context.victim);
        }
        Ok(())
    });

    bus.register(EventKind::DamageDealt, |event: &mut CombatEvent| {
        let damage = event.damage().ok_or_else(|| {
            combat_core::ListenerError::new("damage event without damage payload")
        })?;
        let mut notes = Vec::new();
        if damage.is_critical {
            notes.push("crit");
        }
        if damage.is_vulnerable {
            notes.push("vulnerable");
        }
        if damage.is_lucky_hit {
            notes.push("lucky");
        }
        let suffix = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        println!(
            "    {} hits {} with {} for {:.0}{}",
            event.context.attacker,
            event.context.victim,
            event.context.skill_id,
            damage.final_damage,
            suffix
        );
        Ok(())
    });

    bus.set_script_host(Arc::new(DemoScriptHost));
    bus.register_script_hook(EventKind::DamageDealt, "soften_killing_blows");
    bus.register_script_hook(EventKind::DamageDealt, "on_damage_dealt");

    bus
}

/// Resolve one swing end to end; returns false if the hit was vetoed
fn resolve_attack(
    resolver: &mut DamageResolver,
    bus: &CombatEventBus,
    statuses: &mut StatusRegistry,
    attacker: &Combatant,
    victim: &mut Combatant,
) -> bool {
    let (skill_id, coefficient, ref tags) = attacker.skill;

    let mut ctx = DamageContext::new(&attacker.stats, &victim.stats, coefficient, tags.clone())
        .with_vulnerable(statuses.is_vulnerable(&victim.id))
        .with_attacker_health(attacker.current_hp, attacker.fortify);

    let raw = resolver.compute_offense(&mut ctx);

    let event_context = CombatContext::new(attacker.id.clone(), victim.id.clone())
        .with_skill(skill_id, coefficient)
        .with_tags(tags.clone());
    let info = DamageInfo {
        base_damage: raw,
        final_damage: raw,
        is_critical: ctx.is_critical,
        is_overpower: ctx.is_overpower,
        is_vulnerable: ctx.is_vulnerable,
        is_lucky_hit: ctx.is_lucky_hit,
    };

    let mut pre_event = CombatEvent::damage_calculated(event_context.clone(), info);
    if bus.fire(&mut pre_event) {
        println!("    {}'s {} was cancelled", attacker.id, skill_id);
        return false;
    }
    let adjusted = pre_event.damage().map(|d| d.final_damage).unwrap_or(raw);

    let mut defense = DefenseState {
        current_hp: victim.current_hp,
        fortify: victim.fortify,
        barrier: victim.barrier,
    };
    let reached = resolver.apply_mitigation(&ctx, adjusted, attacker.level, &mut defense);
    victim.barrier = defense.barrier;

    let mut post_event = CombatEvent::damage_dealt(
        event_context.clone(),
        DamageInfo {
            final_damage: reached,
            ..info
        },
    );
    bus.fire(&mut post_event);
    let final_damage = post_event.damage().map(|d| d.final_damage).unwrap_or(reached);

    victim.current_hp -= final_damage;

    // Crits tear armor gaps open; every third hit draws blood
    if ctx.is_critical {
        statuses.apply(&victim.id, StatusEffect::vulnerable(3 * TICKS_PER_SECOND));
    }
    if ctx.is_lucky_hit {
        statuses.apply(&victim.id, StatusEffect::bleed(5 * TICKS_PER_SECOND, 12.0));
    }

    if victim.current_hp <= 0.0 {
        victim.current_hp = 0.0;
        bus.fire(&mut CombatEvent::entity_death(event_context));
    }
    true
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut player = make_barbarian();
    player.stats.set_base(StatId::LuckyHitChance, 0.33);
    let mut boss = make_butcher();

    let bus = wire_bus();
    let mut statuses = StatusRegistry::new();
    let rng = ChaCha8Rng::seed_from_u64(1337);
    let mut resolver = DamageResolver::new(Box::new(RngRoll::new(rng)));

    println!("=== {} vs {} ===", player.id, boss.id);

    let mut tick: u32 = 0;
    while player.is_alive() && boss.is_alive() && tick < 60 * TICKS_PER_SECOND {
        tick += 1;
        statuses.tick();

        if tick % ATTACK_INTERVAL == 0 {
            if statuses.is_incapacitated(&player.id) {
                println!("  [t{tick}] {} is incapacitated", player.id);
            } else {
                resolve_attack(&mut resolver, &bus, &mut statuses, &player, &mut boss);
            }
            if boss.is_alive() {
                resolve_attack(&mut resolver, &bus, &mut statuses, &boss, &mut player);
            }
        }

        // Coarse DoT cadence: once per game second
        if tick % TICKS_PER_SECOND == 0 {
            for target in [&mut player, &mut boss] {
                let dot = statuses.process_dot(&target.id);
                if dot > 0.0 && target.is_alive() {
                    target.current_hp = (target.current_hp - dot).max(0.0);
                    println!("  [t{tick}] {} bleeds for {dot:.0}", target.id);
                }
            }
        }
    }

    println!("=== battle over after {tick} ticks ===");
    println!(
        "{}: {:.0} hp | {}: {:.0} hp (barrier {:.0})",
        player.id, player.current_hp, boss.id, boss.current_hp, boss.barrier
    );
    for (kind, count) in bus.event_counts() {
        println!("  events {kind:?}: {count}");
    }

    // Despawn cleanup, as the world collaborator would run it
    let removed = statuses.cleanup(|id| {
        (id == &player.id && !player.is_alive()) || (id == &boss.id && !boss.is_alive())
    });
    if removed > 0 {
        println!("  cleaned up {removed} despawned entities");
    }
}
