//! Entity spawn factories for setting up the arena world.
//!
//! Creates bot combatants with their component bundles and brains.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_brain::{BotBrain, BrainConfig};
use skirmish_core::components::*;
use skirmish_core::constants::PLAYER_MAX_HEALTH;
use skirmish_core::enums::Weapon;
use skirmish_core::types::{Powerups, Vec3};
use skirmish_core::weapons::{weapon_def, Inventory, Loadout};
use skirmish_geometry::ArenaGeometry;

use crate::adapter::handle_of;
use crate::engine::{SimConfig, SimError};

/// Spawn `config.bots` bots at shuffled spawn points and create their brains.
///
/// Brain seeds are drawn from `rng`, so the whole match follows from the
/// engine seed.
pub fn spawn_bots(
    world: &mut World,
    geometry: &ArenaGeometry,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<BotBrain>, SimError> {
    let offset = rng.gen_range(0..geometry.spawn_points.len());
    let center = arena_center(geometry);
    let mut brains = Vec::with_capacity(config.bots);

    for index in 0..config.bots {
        let origin = geometry.spawn_points[(offset + index) % geometry.spawn_points.len()];
        let team = if config.brain.team_based {
            (index % 2) as u8
        } else {
            index as u8
        };
        let entity = spawn_combatant(
            world,
            &format!("bot{index}"),
            team,
            origin,
            look_toward(origin, center),
            starting_loadout(config),
            index,
        );

        let brain = BotBrain::new(
            handle_of(entity),
            config.skill_for(index),
            config.brain,
            rng.gen(),
            0,
        )?;
        brains.push(brain);
    }

    Ok(brains)
}

/// Spawn one bot-controlled combatant.
pub fn spawn_combatant(
    world: &mut World,
    name: &str,
    team: u8,
    origin: Vec3,
    look_dir: Vec3,
    loadout: Loadout,
    brain_slot: usize,
) -> hecs::Entity {
    world.spawn((
        Callsign {
            name: name.to_string(),
        },
        Body {
            origin,
            velocity: Vec3::ZERO,
            look_dir,
        },
        full_vitals(),
        Arsenal {
            loadout,
            pending_weapon: Some(best_owned_weapon(&loadout)),
            weapon_time_ms: 0,
        },
        Affiliation { team },
        TargetFlags::default(),
        Powerups::default(),
        Score::default(),
        BotControlled { brain_slot },
        BotIntent::default(),
    ))
}

pub fn full_vitals() -> Vitals {
    Vitals {
        health: PLAYER_MAX_HEALTH,
        max_health: PLAYER_MAX_HEALTH,
        armor: 0.0,
    }
}

/// Loadout a combatant (re)spawns with.
pub fn starting_loadout(config: &SimConfig) -> Loadout {
    starting_loadout_for(config.full_loadout, &config.brain)
}

fn starting_loadout_for(full: bool, brain: &BrainConfig) -> Loadout {
    if brain.instagib {
        let mut loadout = Loadout::melee_only();
        loadout.give(Weapon::Instagun, weapon_def(Weapon::Instagun).max_ammo);
        return loadout;
    }
    if full {
        Loadout::full()
    } else {
        Loadout::melee_only()
    }
}

/// Weapon raised on spawn: the strongest owned one with ammo.
fn best_owned_weapon(loadout: &Loadout) -> Weapon {
    Weapon::ALL
        .iter()
        .rev()
        .copied()
        .find(|w| *w != Weapon::Gunblade && loadout.ready_to_fire(*w) > 0)
        .unwrap_or(Weapon::Gunblade)
}

/// Mean of the spawn points.
pub fn arena_center(geometry: &ArenaGeometry) -> Vec3 {
    let sum: Vec3 = geometry.spawn_points.iter().copied().sum();
    sum / geometry.spawn_points.len().max(1) as f32
}

/// Horizontal unit direction from `origin` to `target`, +X when they coincide.
pub fn look_toward(origin: Vec3, target: Vec3) -> Vec3 {
    let delta = target - origin;
    Vec3::new(delta.x, delta.y, 0.0)
        .try_normalize()
        .unwrap_or(Vec3::X)
}
