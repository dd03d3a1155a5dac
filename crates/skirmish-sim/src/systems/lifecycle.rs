//! Elimination and respawn.
//!
//! An eliminated combatant stays in the world as a ghost until its respawn
//! time, so handles held by other brains stay valid but report ghosting.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use skirmish_brain::BotBrain;
use skirmish_core::components::*;
use skirmish_core::enums::Weapon;
use skirmish_core::events::MatchEvent;
use skirmish_core::types::{Powerups, Vec3};
use skirmish_geometry::ArenaGeometry;

use crate::adapter::handle_of;
use crate::engine::SimConfig;
use crate::world_setup::{arena_center, full_vitals, look_toward, starting_loadout};

/// Turn a combatant into a ghost and credit the killer.
pub fn eliminate(
    world: &mut World,
    brains: &mut [BotBrain],
    victim: Entity,
    killer: Option<Entity>,
    weapon: Option<Weapon>,
    respawn_at_ms: u64,
    events: &mut Vec<MatchEvent>,
) {
    if world.get::<&Ghost>(victim).is_ok() {
        return;
    }

    if let Ok(mut score) = world.get::<&mut Score>(victim) {
        score.deaths += 1;
        if killer == Some(victim) || killer.is_none() {
            score.frags -= 1;
        }
    }
    if let Some(killer) = killer.filter(|k| *k != victim) {
        if let Ok(mut score) = world.get::<&mut Score>(killer) {
            score.frags += 1;
        }
    }
    if let Ok(mut body) = world.get::<&mut Body>(victim) {
        body.velocity = Vec3::ZERO;
    }
    if let Ok(mut intent) = world.get::<&mut BotIntent>(victim) {
        *intent = BotIntent::default();
    }
    if let Some(brain) = brain_of(world, brains, victim) {
        brain.on_eliminated();
    }
    // Insert fails only for a despawned victim, which has nothing to mark.
    let _ = world.insert_one(victim, Ghost { respawn_at_ms });

    info!(
        victim = %handle_of(victim),
        killer = ?killer.map(handle_of),
        ?weapon,
        "combatant eliminated"
    );
    events.push(MatchEvent::Eliminated {
        victim: handle_of(victim),
        killer: killer.map(handle_of),
        weapon,
    });
}

/// Respawn every ghost whose delay has run out.
pub fn run(
    world: &mut World,
    geometry: &ArenaGeometry,
    brains: &mut [BotBrain],
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    now: u64,
    events: &mut Vec<MatchEvent>,
) {
    // Collect first to avoid borrow issues with hecs
    let due: Vec<Entity> = world
        .query::<&Ghost>()
        .iter()
        .filter(|(_, ghost)| ghost.respawn_at_ms <= now)
        .map(|(entity, _)| entity)
        .collect();
    if due.is_empty() {
        return;
    }

    let center = arena_center(geometry);
    for entity in due {
        let Some(&origin) = geometry.spawn_points.choose(rng) else {
            warn!(entity = %handle_of(entity), layout = %geometry.name, "no spawn point, respawn postponed");
            continue;
        };
        let loadout = starting_loadout(config);
        let _ = world.remove_one::<Ghost>(entity);

        if let Ok(mut body) = world.get::<&mut Body>(entity) {
            *body = Body {
                origin,
                velocity: Vec3::ZERO,
                look_dir: look_toward(origin, center),
            };
        }
        if let Ok(mut vitals) = world.get::<&mut Vitals>(entity) {
            *vitals = full_vitals();
        }
        if let Ok(mut arsenal) = world.get::<&mut Arsenal>(entity) {
            arsenal.loadout = loadout;
            arsenal.pending_weapon = Some(Weapon::Gunblade);
            arsenal.weapon_time_ms = 0;
        }
        if let Ok(mut powerups) = world.get::<&mut Powerups>(entity) {
            *powerups = Powerups::default();
        }
        if let Some(brain) = brain_of(world, brains, entity) {
            brain.on_respawn(now);
        }
        events.push(MatchEvent::Respawned {
            entity: handle_of(entity),
        });
    }
}

/// Brain of a bot-controlled entity.
pub fn brain_of<'a>(
    world: &World,
    brains: &'a mut [BotBrain],
    entity: Entity,
) -> Option<&'a mut BotBrain> {
    let slot = world.get::<&BotControlled>(entity).ok()?.brain_slot;
    brains.get_mut(slot)
}
