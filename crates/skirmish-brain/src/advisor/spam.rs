//! Weapon choice for suppressive fire at a last-seen spot.

use skirmish_core::enums::Weapon;
use skirmish_core::types::bounded_fraction;
use skirmish_core::weapons::{laser_range, Inventory};
use tracing::debug;

use super::{AdvisorContext, WeaponScores};
use crate::task::CombatTask;

/// How recently the opponent must have been seen to prepare for a real fight instead.
const RECENTLY_SEEN_MS: u64 = 1000;

pub fn suggest_spam_weapon_and_tactics(ctx: &mut AdvisorContext<'_>, task: &mut CombatTask) {
    let bot = ctx.bot;
    let spot = ctx.tracked.last_seen_position();
    let distance = spot.distance(bot.origin);
    let env = ctx.probe_environment(spot, None);

    let ready = |w: Weapon| bot.ready_to_fire(w) as f32;
    let mut scores = WeaponScores::new(&[
        (Weapon::Plasmagun, bounded_fraction(ready(Weapon::Plasmagun), 30.0)),
        (Weapon::Machinegun, 0.7 * bounded_fraction(ready(Weapon::Machinegun), 30.0)),
        (Weapon::RocketLauncher, 1.2 * bounded_fraction(ready(Weapon::RocketLauncher), 5.0)),
        (Weapon::GrenadeLauncher, bounded_fraction(ready(Weapon::GrenadeLauncher), 3.0)),
        (Weapon::Gunblade, 0.5),
    ]);

    // Everything but bullets loses value with distance.
    scores.scale(Weapon::Plasmagun, 1.0 - 0.8 * bounded_fraction(distance, 5000.0));
    scores.scale(Weapon::Machinegun, bounded_fraction(distance, 2000.0));
    scores.scale(Weapon::RocketLauncher, 0.5 - 0.5 * bounded_fraction(distance, 1500.0));
    scores.scale(Weapon::GrenadeLauncher, 1.0 - bounded_fraction(distance, 1100.0));
    scores.scale(Weapon::Gunblade, 1.0 - 0.5 * bounded_fraction(distance, 3000.0));

    scores.scale(Weapon::Plasmagun, 0.7 + 0.3 * env);
    scores.scale(Weapon::Machinegun, 1.0 - env);
    scores.scale(Weapon::RocketLauncher, 0.2 + 0.8 * env);
    scores.scale(Weapon::GrenadeLauncher, env);
    scores.scale(Weapon::Gunblade, 0.4 + 0.6 * env);

    // 0 for spots half-gravity or more above the bot, 1 for spots as far below.
    let delta_z = bot.origin.z - spot.z;
    let delta_z_bound = ctx.config.gravity / 2.0;
    let gravity_factor = (delta_z.min(delta_z_bound) / delta_z_bound + 1.0) / 2.0;
    scores.scale(Weapon::GrenadeLauncher, 1.5 * gravity_factor);

    // Self-damage cut-offs.
    if distance < 200.0 {
        scores.set(Weapon::RocketLauncher, 0.0);
    }
    if distance < 250.0 {
        scores.set(Weapon::Gunblade, 0.0);
    }
    if distance < 50.0 {
        scores.set(Weapon::Plasmagun, 0.0);
    }

    let mut weapon = ctx.choose(&scores);

    let recently_seen = ctx.now.saturating_sub(ctx.tracked.last_seen_at) < RECENTLY_SEEN_MS;
    if matches!(weapon, None | Some(Weapon::Gunblade)) && recently_seen {
        // Nothing to spam with and the enemy is close: hold a fighting weapon instead.
        task.inhibit = true;
        if distance < laser_range() {
            if bot.ready_to_fire(Weapon::Lasergun) > 15 {
                weapon = Some(Weapon::Lasergun);
            } else if bot.ready_to_fire(Weapon::Riotgun) > 0 {
                weapon = Some(Weapon::Riotgun);
            }
        } else if bot.ready_to_fire(Weapon::Electrobolt) > 0 {
            weapon = Some(Weapon::Electrobolt);
        } else if bot.ready_to_fire(Weapon::Plasmagun) > 0 {
            weapon = Some(Weapon::Plasmagun);
        }
    }

    debug!(bot = %bot.handle, opponent = %ctx.tracked.entity, %scores, ?weapon, "spam weapon choice");
    task.suggested_spam_weapon = weapon;
}
