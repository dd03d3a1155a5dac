//! Fast weapon switch overrides: finish a weak enemy, hit an escaping one,
//! or take a shot of despair.

use rand::Rng;
use skirmish_core::constants::{
    CLOSE_RANGE, DEFAULT_DASH_SPEED, DESPAIR_MAX_WEAPON_TIME, FAST_SWITCH_MAX_WEAPON_TIME,
    SKILL_EASY,
};
use skirmish_core::enums::Weapon;
use skirmish_core::types::bounded_fraction;
use skirmish_core::weapons::{laser_range, Inventory};
use tracing::debug;

use super::{AdvisorContext, WeaponScores};
use crate::weighting::CombatDisposition;
use crate::world::Combatant;

/// Damage-to-kill below which the bot tries to finish the opponent off.
const FINISH_DAMAGE_TO_KILL: f32 = 75.0;

/// Pick an override weapon that should be switched to right now.
///
/// Only considered while the current weapon is almost ready to fire again.
pub fn fast_switch_weapon(ctx: &mut AdvisorContext<'_>, opponent: &Combatant) -> Option<Weapon> {
    if ctx.bot.weapon_time_ms >= FAST_SWITCH_MAX_WEAPON_TIME || ctx.skill < SKILL_EASY {
        return None;
    }

    let disposition = CombatDisposition::new(
        ctx.bot,
        opponent,
        ctx.tracked.last_seen_position(),
        ctx.config,
    );

    if disposition.damage_to_kill < FINISH_DAMAGE_TO_KILL {
        let weapon = finish_weapon(ctx, opponent, &disposition);
        debug!(bot = %ctx.bot.handle, opponent = %opponent.handle, ?weapon, "finishing weak enemy");
        weapon
    } else if is_escaping(ctx.bot, opponent) {
        let weapon = hit_escaping_weapon(ctx, disposition.distance);
        debug!(bot = %ctx.bot.handle, opponent = %opponent.handle, ?weapon, "hitting escaping enemy");
        weapon
    } else if shot_of_despair_check(ctx, opponent, &disposition) {
        let weapon = shot_of_despair_weapon(ctx, opponent, disposition.distance);
        debug!(bot = %ctx.bot.handle, opponent = %opponent.handle, ?weapon, "shot of despair");
        weapon
    } else {
        None
    }
}

/// Weapon most likely to land the killing blow. Falls back to the Gunblade.
pub fn finish_weapon(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
) -> Option<Weapon> {
    let bot = ctx.bot;
    let distance = disposition.distance;
    let dtk = disposition.damage_to_kill;
    let env = ctx.environment_factor();
    let lg_range = laser_range();

    let lasers = bot.ready_to_fire(Weapon::Lasergun) as f32;
    let bullets = bot.ready_to_fire(Weapon::Machinegun) as f32;
    let plasmas = bot.ready_to_fire(Weapon::Plasmagun) as f32;
    let shells = bot.ready_to_fire(Weapon::Riotgun);
    let rockets = bot.ready_to_fire(Weapon::RocketLauncher);
    let grenades = bot.ready_to_fire(Weapon::GrenadeLauncher);
    let bolts = bot.ready_to_fire(Weapon::Electrobolt);

    if distance < CLOSE_RANGE {
        if ctx.config.allow_self_damage && disposition.damage_to_be_killed < FINISH_DAMAGE_TO_KILL {
            // Explosives would hurt us too.
            if lasers > dtk * 0.3 * 14.0 {
                return Some(Weapon::Lasergun);
            }
            if shells > 0 {
                return Some(Weapon::Riotgun);
            }
            if bullets > dtk * 0.3 * 10.0 {
                return Some(Weapon::Machinegun);
            }
            if plasmas > dtk * 0.3 * 14.0 {
                return Some(Weapon::Plasmagun);
            }
            // Only a dumb bot would blow itself up.
            if ctx.skill < 0.66 && rockets > 0 {
                return Some(Weapon::RocketLauncher);
            }
        } else {
            if rockets > 0 && env > 0.0 {
                return Some(Weapon::RocketLauncher);
            }
            if shells > 0 {
                return Some(Weapon::Riotgun);
            }
            if plasmas > dtk * 0.3 * 14.0 {
                return Some(Weapon::Plasmagun);
            }
            if lasers > dtk * 0.3 * 14.0 {
                return Some(Weapon::Lasergun);
            }
            if bullets > dtk * 0.3 * 10.0 {
                return Some(Weapon::Machinegun);
            }
        }
        return Some(Weapon::Gunblade);
    }

    if distance < lg_range {
        if distance < lg_range / 2.0 && env > 0.6 && rockets > 0 {
            return Some(Weapon::RocketLauncher);
        }
        if bolts > 0 && dtk > 30.0 && opponent.pending_weapon == Some(Weapon::Lasergun) {
            return Some(Weapon::Electrobolt);
        }
        if lasers > dtk * 0.3 * 14.0 {
            return Some(Weapon::Lasergun);
        }
        if shells > 0 {
            return Some(Weapon::Riotgun);
        }
        if bullets > dtk * 0.3 * 10.0 {
            return Some(Weapon::Machinegun);
        }
        if plasmas > dtk * 0.3 * 14.0 {
            return Some(Weapon::Plasmagun);
        }
        if ctx.rng.gen::<f32>() < 0.15 && ctx.skill > 0.5 && grenades > 0 && env > 0.5 {
            return Some(Weapon::GrenadeLauncher);
        }
        return Some(Weapon::Gunblade);
    }

    if bullets > dtk * 0.3 * 10.0 {
        return Some(Weapon::Machinegun);
    }
    if bolts > 0 {
        return Some(Weapon::Electrobolt);
    }
    if shells > 0 {
        return Some(Weapon::Riotgun);
    }
    Some(Weapon::Gunblade)
}

/// Whether `opponent` is running away from `bot`.
pub fn is_escaping(bot: &Combatant, opponent: &Combatant) -> bool {
    let dash_squared = DEFAULT_DASH_SPEED * DEFAULT_DASH_SPEED;
    if opponent.velocity.length_squared() < dash_squared {
        return false;
    }
    if bot.velocity.length_squared() >= dash_squared {
        // Both are moving fast: escaping means heading the opposite way.
        let bot_dir = bot.velocity.normalize_or_zero();
        let opponent_dir = opponent.velocity.normalize_or_zero();
        return bot_dir.dot(opponent_dir) < -0.5;
    }
    is_escaping_from_standing(opponent, bot)
}

fn is_escaping_from_standing(escaping: &Combatant, standing: &Combatant) -> bool {
    let speed = escaping.speed();
    if speed < 1.35 * DEFAULT_DASH_SPEED {
        return false;
    }
    let to_standing = standing.origin - escaping.origin;
    let distance_squared = to_standing.length_squared();
    if distance_squared < 1.0 {
        return false;
    }
    let to_standing = to_standing / distance_squared.sqrt();
    let move_dir = escaping.velocity / speed;
    to_standing.dot(move_dir) < -0.5
}

/// Long-range weapon for a fleeing opponent, if one is worth it.
pub fn hit_escaping_weapon(ctx: &mut AdvisorContext<'_>, distance: f32) -> Option<Weapon> {
    if distance < laser_range() - 150.0 {
        return None;
    }
    let bot = ctx.bot;
    let env = ctx.environment_factor();
    let has = |w: Weapon| if bot.ready_to_fire(w) > 0 { 1.0 } else { 0.0 };

    let scores = WeaponScores::new(&[
        (
            Weapon::Electrobolt,
            has(Weapon::Electrobolt)
                * (1.0 + 0.33 * ctx.skill)
                * (0.3 + 0.7 * bounded_fraction(distance, 2000.0)),
        ),
        (
            Weapon::RocketLauncher,
            has(Weapon::RocketLauncher)
                * 1.33
                * (0.3 + 0.7 * env)
                * (1.0 - bounded_fraction(distance, 1500.0)),
        ),
        (
            Weapon::Gunblade,
            0.8 * (0.6 + 0.4 * env) * (1.0 - 0.3 * bounded_fraction(distance, 2500.0)),
        ),
    ]);
    scores.best()
}

/// Whether the bot is about to die and should gamble on a single big hit.
pub fn shot_of_despair_check(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
) -> bool {
    let bot = ctx.bot;
    if bot.powerups.any() || bot.weapon_time_ms > DESPAIR_MAX_WEAPON_TIME {
        return false;
    }

    let mut damage_to_be_killed = disposition.damage_to_be_killed;
    if opponent.has_quad() {
        damage_to_be_killed *= 0.25;
    }
    if damage_to_be_killed > 25.0 || disposition.damage_to_kill < 35.0 {
        return false;
    }

    let lg_range = laser_range();
    let distance = disposition.distance;
    if distance > lg_range {
        return false;
    }

    match opponent.pending_weapon {
        Some(Weapon::Lasergun) | Some(Weapon::Machinegun) => true,
        Some(Weapon::Plasmagun) | Some(Weapon::RocketLauncher) => {
            ctx.rng.gen::<f32>() > distance / lg_range
        }
        _ => false,
    }
}

/// Best single-shot weapon when the bot will not survive a long fight.
pub fn shot_of_despair_weapon(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    distance: f32,
) -> Option<Weapon> {
    let bot = ctx.bot;
    let bolts = bot.ready_to_fire(Weapon::Electrobolt);
    let shells = bot.ready_to_fire(Weapon::Riotgun);

    let mut score = bot.score as f32;
    if ctx.config.inverse_score {
        score = -score;
    }
    // A losing bot prefers a safe hitscan gamble.
    if score <= 0.0 {
        if bolts > 0 {
            return Some(Weapon::Electrobolt);
        }
        if shells > 0 {
            return Some(Weapon::Riotgun);
        }
        return None;
    }

    let env = ctx.probe_environment(opponent.origin, Some(opponent.handle));
    let lg_range = laser_range();
    let has = |w: Weapon| if bot.ready_to_fire(w) > 0 { 1.0 } else { 0.0 };

    let mut scores = WeaponScores::new(&[
        (Weapon::Electrobolt, has(Weapon::Electrobolt)),
        (Weapon::Riotgun, has(Weapon::Riotgun)),
        (Weapon::RocketLauncher, has(Weapon::RocketLauncher)),
        (Weapon::Gunblade, 0.8),
        (Weapon::GrenadeLauncher, 0.7 * has(Weapon::GrenadeLauncher)),
    ]);

    scores.scale(Weapon::RocketLauncher, env);
    scores.scale(Weapon::GrenadeLauncher, env);
    scores.scale(Weapon::Gunblade, 0.5 + 0.5 * env);

    scores.scale(Weapon::RocketLauncher, 1.0 - 0.75 * distance / lg_range);
    scores.scale(Weapon::GrenadeLauncher, 1.0 - 0.999 * distance / lg_range);

    if distance < 150.0 {
        scores.scale(Weapon::RocketLauncher, 2.0);
        scores.scale(Weapon::GrenadeLauncher, 2.0);
    } else if distance > 0.66 * lg_range {
        scores.scale(Weapon::Electrobolt, 1.5);
    }

    match opponent.pending_weapon {
        Some(Weapon::Lasergun) | Some(Weapon::Plasmagun) => {
            scores.scale(Weapon::RocketLauncher, 1.75);
            scores.scale(Weapon::GrenadeLauncher, 1.35);
        }
        Some(Weapon::RocketLauncher) => {
            scores.scale(Weapon::Riotgun, 2.0);
        }
        _ => {}
    }

    scores.best()
}
