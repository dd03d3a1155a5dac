//! Weapon choices that bypass the range brackets: easy bots, instagib
//! matches and quad bearers.

use rand::Rng;
use skirmish_core::constants::CLOSE_RANGE;
use skirmish_core::enums::{LegacyRange, Weapon};
use skirmish_core::weapons::{laser_range, weapon_def, Inventory};

use super::AdvisorContext;
use crate::world::Combatant;

/// Laser charges a quad bearer wants before preferring the Lasergun.
const QUAD_LASERS_THRESHOLD: u32 = 7;

/// Legacy range-table pick with skill-scaled noise.
pub fn easy_bot_weapon(ctx: &mut AdvisorContext<'_>, opponent: &Combatant) -> Option<Weapon> {
    let bot = ctx.bot;
    let range = LegacyRange::classify(bot.origin.distance(opponent.origin));
    let noise = 1.0 - ctx.skill;

    let mut best_weight = 0.0;
    let mut best = None;
    for weapon in Weapon::ALL {
        if !bot.can_fire(weapon) {
            continue;
        }
        let mut weight = weapon_def(weapon).range_weight(range);
        if bot.ammo(weapon) > 0 {
            weight *= 1.25;
        }
        weight += (ctx.rng.gen::<f32>() * 2.0 - 1.0) * noise;
        if weight > best_weight {
            best_weight = weight;
            best = Some(weapon);
        }
    }
    best
}

/// Everything but the Gunblade kills in one hit; prefer hitscan.
pub fn instagib_weapon(ctx: &mut AdvisorContext<'_>) -> Option<Weapon> {
    let bot = ctx.bot;
    let distance_squared = ctx.tracked.last_seen_position().distance_squared(bot.origin);
    let lg_range = laser_range();

    if bot.ready_to_fire(Weapon::Machinegun) > 0 {
        return Some(Weapon::Machinegun);
    }
    if bot.has_weapon(Weapon::Lasergun)
        && bot.ammo(Weapon::Lasergun) > 0
        && distance_squared < lg_range * lg_range
    {
        return Some(Weapon::Lasergun);
    }
    if bot.ready_to_fire(Weapon::Riotgun) > 0 {
        return Some(Weapon::Riotgun);
    }
    if bot.has_weapon(Weapon::Plasmagun)
        && distance_squared < 1000.0
        && bot.ready_to_fire(Weapon::Plasmagun) > 0
    {
        return Some(Weapon::Plasmagun);
    }
    if bot.has_weapon(Weapon::Instagun) {
        return Some(Weapon::Instagun);
    }
    if bot.ready_to_fire(Weapon::Electrobolt) > 0 {
        return Some(Weapon::Electrobolt);
    }
    Some(Weapon::Gunblade)
}

/// Rapid-fire weapons multiply best with quad damage.
pub fn quad_bearer_weapon(ctx: &mut AdvisorContext<'_>) -> Option<Weapon> {
    let bot = ctx.bot;
    let target = ctx.tracked.last_seen_position();
    let distance = target.distance(bot.origin);
    let lg_range = laser_range();

    let mut lasers = 0;
    if bot.has_weapon(Weapon::Lasergun) && distance < lg_range {
        lasers = bot.ready_to_fire(Weapon::Lasergun);
        if lasers > QUAD_LASERS_THRESHOLD {
            return Some(Weapon::Lasergun);
        }
    }

    let bullets = bot.ready_to_fire(Weapon::Machinegun);
    if bullets > 10 {
        return Some(Weapon::Machinegun);
    }
    let plasmas = bot.ready_to_fire(Weapon::Plasmagun);
    if plasmas > 10 {
        return Some(Weapon::Plasmagun);
    }
    if bot.ready_to_fire(Weapon::Riotgun) > 0 {
        return Some(Weapon::Riotgun);
    }
    if bot.ready_to_fire(Weapon::RocketLauncher) > 0
        && distance > CLOSE_RANGE
        && distance < lg_range * 1.25
    {
        return Some(Weapon::RocketLauncher);
    }
    if lasers > 0 && distance < lg_range {
        return Some(Weapon::Lasergun);
    }
    if bullets > 0 {
        return Some(Weapon::Machinegun);
    }
    if plasmas > 0 {
        return Some(Weapon::Plasmagun);
    }
    if bot.ready_to_fire(Weapon::GrenadeLauncher) > 0
        && distance > CLOSE_RANGE
        && distance < lg_range
    {
        // Lob grenades only at targets well above.
        let delta_z = bot.origin.z - target.z;
        if delta_z < -250.0 && ctx.rng.gen::<f32>() > 0.5 {
            return Some(Weapon::GrenadeLauncher);
        }
    }
    Some(Weapon::Gunblade)
}
