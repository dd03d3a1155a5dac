//! Combat system: hitscan fire and damage resolution.
//!
//! Every weapon is resolved as an instant trace. Splash weapons also damage
//! everyone near the impact point, the shooter included when self damage
//! is allowed.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use skirmish_brain::BotBrain;
use skirmish_core::components::*;
use skirmish_core::enums::Weapon;
use skirmish_core::events::{DamageEvent, MatchEvent};
use skirmish_core::types::{bounded_fraction, Powerups, Vec3};
use skirmish_core::weapons::{weapon_def, Inventory};
use skirmish_geometry::{has_line_of_sight, ArenaGeometry};

use crate::adapter::{entity_of, eye_of, handle_of};
use crate::engine::SimConfig;
use crate::systems::lifecycle::{brain_of, eliminate};

/// Radius of splash damage around an impact point.
pub const SPLASH_RADIUS: f32 = 150.0;

/// Bots only pull the trigger when facing the target this closely (cosine).
const MIN_AIM_DOT: f32 = 0.9;

struct Shot {
    shooter: Entity,
    weapon: Weapon,
    damage: f32,
    /// Directly hit combatant, if any.
    victim: Option<Entity>,
    /// Impact point of splash weapons.
    impact: Option<Vec3>,
}

/// Fire every ready bot weapon and apply the resulting damage.
pub fn run(
    world: &mut World,
    geometry: &ArenaGeometry,
    brains: &mut [BotBrain],
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    now: u64,
    events: &mut Vec<MatchEvent>,
) {
    let shots = collect_shots(world, geometry, brains, rng);
    if shots.is_empty() {
        return;
    }

    // Spend ammo and start refire timers
    for shot in &shots {
        if let Ok(mut arsenal) = world.get::<&mut Arsenal>(shot.shooter) {
            arsenal.loadout.consume(shot.weapon);
            arsenal.weapon_time_ms = weapon_def(shot.weapon).refire_ms;
        }
    }

    let mut hits = Vec::new();
    for shot in shots {
        if let Some(victim) = shot.victim {
            hits.push(DamageEvent {
                attacker: handle_of(shot.shooter),
                victim: handle_of(victim),
                amount: shot.damage,
                weapon: shot.weapon,
            });
        }
        if let Some(impact) = shot.impact {
            hits.extend(splash_hits(world, &shot, impact, config.brain.allow_self_damage));
        }
    }

    for hit in hits {
        apply_damage(world, brains, config, hit, now, events);
    }
}

/// Resolve which ready bots fire this tick and what they hit.
fn collect_shots(
    world: &World,
    geometry: &ArenaGeometry,
    brains: &[BotBrain],
    rng: &mut ChaCha8Rng,
) -> Vec<Shot> {
    let mut shots = Vec::new();
    let mut query = world.query::<(&Body, &Arsenal, &BotIntent, &BotControlled, Option<&Ghost>)>();
    for (entity, (body, arsenal, intent, control, ghost)) in query.iter() {
        if ghost.is_some() || arsenal.weapon_time_ms > 0 {
            continue;
        }
        let Some(weapon) = arsenal.pending_weapon else {
            continue;
        };
        if !arsenal.loadout.can_fire(weapon) {
            continue;
        }
        let skill = brains.get(control.brain_slot).map_or(0.5, |b| b.skill());
        let def = weapon_def(weapon);
        let quad = world.get::<&Powerups>(entity).map(|p| p.quad).unwrap_or(false);
        let damage = if quad { def.damage * 4.0 } else { def.damage };
        let eye = eye_of(body.origin);

        if let Some(target) = intent.fire_at.and_then(entity_of) {
            let Ok(target_body) = world.get::<&Body>(target) else {
                continue;
            };
            if world.get::<&Ghost>(target).is_ok() {
                continue;
            }
            let target_eye = eye_of(target_body.origin);
            let to_target = target_eye - eye;
            let distance = to_target.length();
            if distance > def.range || to_target.normalize_or_zero().dot(body.look_dir) < MIN_AIM_DOT {
                continue;
            }
            if !has_line_of_sight(geometry, eye, target_eye) {
                continue;
            }

            let accuracy = (0.35 + 0.5 * skill) * (1.0 - 0.5 * bounded_fraction(distance, def.range));
            let hit = rng.gen::<f32>() < accuracy;
            trace!(shooter = %handle_of(entity), ?weapon, distance, hit, "aimed shot");
            shots.push(Shot {
                shooter: entity,
                weapon,
                damage,
                victim: hit.then_some(target),
                impact: def.splash.then_some(if hit { target_body.origin } else { target_eye }),
            });
        } else if let Some(spot) = intent.fire_at_spot {
            let to_spot = spot - eye;
            if to_spot.length() > def.range || to_spot.normalize_or_zero().dot(body.look_dir) < MIN_AIM_DOT {
                continue;
            }
            let impact = geometry.trace_line(eye, spot).end_pos;
            trace!(shooter = %handle_of(entity), ?weapon, ?impact, "suppression shot");
            shots.push(Shot {
                shooter: entity,
                weapon,
                damage,
                victim: None,
                impact: def.splash.then_some(impact),
            });
        }
    }
    shots
}

/// Splash damage around `impact`, excluding the direct victim.
fn splash_hits(world: &World, shot: &Shot, impact: Vec3, allow_self_damage: bool) -> Vec<DamageEvent> {
    let mut hits = Vec::new();
    let mut query = world.query::<(&Body, Option<&Ghost>)>();
    for (entity, (body, ghost)) in query.iter() {
        if ghost.is_some() || Some(entity) == shot.victim {
            continue;
        }
        if entity == shot.shooter && !allow_self_damage {
            continue;
        }
        let distance = body.origin.distance(impact);
        if distance >= SPLASH_RADIUS {
            continue;
        }
        let amount = shot.damage * 0.5 * (1.0 - distance / SPLASH_RADIUS);
        hits.push(DamageEvent {
            attacker: handle_of(shot.shooter),
            victim: handle_of(entity),
            amount,
            weapon: shot.weapon,
        });
    }
    hits
}

/// Apply one hit: armor absorption, ledger callbacks and elimination.
/// Returns true when the victim was eliminated by this hit.
pub fn apply_damage(
    world: &mut World,
    brains: &mut [BotBrain],
    config: &SimConfig,
    hit: DamageEvent,
    now: u64,
    events: &mut Vec<MatchEvent>,
) -> bool {
    let (Some(victim), Some(attacker)) = (entity_of(hit.victim), entity_of(hit.attacker)) else {
        return false;
    };
    if world.get::<&Ghost>(victim).is_ok() {
        return false;
    }

    let shell = world.get::<&Powerups>(victim).map(|p| p.shell).unwrap_or(false);
    let amount = if shell { hit.amount / 4.0 } else { hit.amount };

    let health = {
        let Ok(mut vitals) = world.get::<&mut Vitals>(victim) else {
            return false;
        };
        let protection = config.brain.armor_protection;
        let degradation = config.brain.armor_degradation;
        let mut saved = if vitals.armor > 0.0 { amount * protection } else { 0.0 };
        if degradation > 0.0 {
            saved = saved.min(vitals.armor / degradation);
        }
        vitals.armor = (vitals.armor - saved * degradation).max(0.0);
        vitals.health -= amount - saved;
        vitals.health
    };

    if let Some(brain) = brain_of(world, brains, victim) {
        brain.on_damage_taken(hit.attacker, amount, now);
    }
    if let Some(brain) = brain_of(world, brains, attacker) {
        brain.on_damage_dealt(hit.victim, amount, now);
    }
    events.push(MatchEvent::Hit(DamageEvent { amount, ..hit }));

    if health > 0.0 {
        return false;
    }
    let killer = world.contains(attacker).then_some(attacker);
    eliminate(
        world,
        brains,
        victim,
        killer,
        Some(hit.weapon),
        now + config.respawn_delay_ms,
        events,
    );
    true
}
