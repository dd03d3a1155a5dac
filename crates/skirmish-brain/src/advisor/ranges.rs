//! Range-bracket weapon and tactics routines.

use rand::Rng;
use skirmish_core::constants::{CLOSE_RANGE, DEFAULT_DASH_SPEED};
use skirmish_core::enums::Weapon;
use skirmish_core::types::bounded_fraction;
use skirmish_core::weapons::{laser_range, Inventory};
use tracing::debug;

use super::{AdvisorContext, WeaponScores};
use crate::task::CombatTask;
use crate::weighting::CombatDisposition;
use crate::world::Combatant;

/// Signature shared by all bracket routines.
pub type RangeRoutine =
    fn(&mut AdvisorContext<'_>, &Combatant, &CombatDisposition, &mut CombatTask);

/// Distance brackets relative to the laser's effective range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBracket {
    /// Beyond twice the laser range.
    Sniper,
    /// Beyond the laser range.
    Far,
    /// Beyond close range.
    Middle,
    Close,
}

impl RangeBracket {
    pub fn classify(distance: f32) -> Self {
        let lg_range = laser_range();
        if distance > lg_range * 2.0 {
            RangeBracket::Sniper
        } else if distance > lg_range {
            RangeBracket::Far
        } else if distance > CLOSE_RANGE {
            RangeBracket::Middle
        } else {
            RangeBracket::Close
        }
    }

    pub fn routine(self) -> RangeRoutine {
        match self {
            RangeBracket::Sniper => sniper_range,
            RangeBracket::Far => far_range,
            RangeBracket::Middle => middle_range,
            RangeBracket::Close => close_range,
        }
    }
}

pub fn sniper_range(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
    task: &mut CombatTask,
) {
    let bot = ctx.bot;
    let mut chosen = None;

    // Blind a sniper with plasma.
    if opponent.pending_weapon == Some(Weapon::Electrobolt)
        && ctx.decision_random < ctx.skill / 3.0
        && bot.ready_to_fire(Weapon::Plasmagun) > 0
    {
        chosen = Some(Weapon::Plasmagun);
    }

    if chosen.is_none() {
        let bolts = bot.ready_to_fire(Weapon::Electrobolt) > 0;
        let bullets = bot.ready_to_fire(Weapon::Machinegun) > 0;
        chosen = if disposition.damage_to_kill > 50.0 {
            if bolts {
                Some(Weapon::Electrobolt)
            } else if bullets {
                Some(Weapon::Machinegun)
            } else {
                None
            }
        } else if bullets {
            Some(Weapon::Machinegun)
        } else if bolts {
            Some(Weapon::Electrobolt)
        } else {
            None
        };
    }

    if chosen.is_none() {
        if disposition.damage_to_be_killed < 25.0 && bot.ready_to_fire(Weapon::Riotgun) > 0 {
            chosen = Some(Weapon::Riotgun);
        } else {
            let ratio = disposition.kill_to_be_killed_ratio();
            if ratio < 2.0 || (ratio > 0.75 && ctx.decision_random < 0.5) {
                task.advance = true;
            } else {
                task.inhibit = true;
            }
        }
    }

    debug!(bot = %bot.handle, opponent = %opponent.handle, weapon = ?chosen, "sniper range choice");
    task.suggested_shoot_weapon = chosen;
}

pub fn far_range(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
    task: &mut CombatTask,
) {
    let bot = ctx.bot;

    let bot_has_mid_range = bot.ready_to_fire(Weapon::Lasergun) >= 15
        || bot.ready_to_fire(Weapon::RocketLauncher) >= 3
        || bot.ready_to_fire(Weapon::Plasmagun) >= 20;
    let opponent_has_mid_range = opponent.ready_to_fire(Weapon::Lasergun) >= 15
        || opponent.ready_to_fire(Weapon::RocketLauncher) >= 2
        || opponent.ready_to_fire(Weapon::Plasmagun) > 15;

    if bot_has_mid_range && !opponent_has_mid_range {
        task.advance = true;
    }
    if !bot_has_mid_range && opponent_has_mid_range {
        task.retreat = true;
    }

    let ratio = disposition.kill_to_be_killed_ratio();
    if ratio > 2.0 {
        task.advance = false;
        task.retreat = true;
    } else if ratio < 1.0 {
        task.advance = true;
        task.retreat = false;
    }

    let mut scores = WeaponScores::new(&[
        (
            Weapon::Electrobolt,
            bounded_fraction(bot.ready_to_fire(Weapon::Electrobolt) as f32, 2.0),
        ),
        (
            Weapon::Machinegun,
            bounded_fraction(bot.ready_to_fire(Weapon::Machinegun) as f32, 10.0),
        ),
        (
            Weapon::Plasmagun,
            0.8 * bounded_fraction(bot.ready_to_fire(Weapon::Plasmagun) as f32, 15.0),
        ),
        (
            Weapon::Riotgun,
            0.6 * bounded_fraction(bot.ready_to_fire(Weapon::Riotgun) as f32, 2.0),
        ),
    ]);

    scores.add(Weapon::Electrobolt, ctx.skill / 3.0);

    // Counter-weapons.
    match opponent.pending_weapon {
        Some(Weapon::Electrobolt) => {
            scores.scale(Weapon::Plasmagun, 1.3);
            scores.scale(Weapon::Machinegun, 1.2);
        }
        Some(Weapon::Plasmagun) => {
            scores.scale(Weapon::Electrobolt, 1.4);
            scores.scale(Weapon::Machinegun, 1.2);
        }
        Some(Weapon::Machinegun) => {
            scores.scale(Weapon::Plasmagun, 1.2);
            scores.scale(Weapon::Electrobolt, 1.3);
        }
        _ => {}
    }

    // Plasma is useless against fast side-to-side movement.
    let speed = opponent.speed();
    if speed > DEFAULT_DASH_SPEED {
        let move_dir = opponent.velocity / speed;
        let to_target = (ctx.tracked.last_seen_position() - bot.origin).normalize_or_zero();
        let speed_factor =
            bounded_fraction(speed - DEFAULT_DASH_SPEED, 1000.0 - DEFAULT_DASH_SPEED);
        let dir_factor = to_target.dot(move_dir).abs();
        scores.scale(Weapon::Plasmagun, 1.0 - (1.0 - dir_factor) * speed_factor);
    }

    let mut chosen = ctx.choose(&scores);

    if chosen.is_none() {
        // Most rockets miss at this distance, so only a big stock is worth it.
        let rockets = bot.ready_to_fire(Weapon::RocketLauncher).min(6) as f32;
        let rocket_score = ctx.environment_factor() * rockets / 6.0;
        if rocket_score > 0.4 {
            chosen = Some(Weapon::RocketLauncher);
            if !task.retreat {
                task.advance = true;
            }
        }
    }

    debug!(bot = %bot.handle, opponent = %opponent.handle, %scores, weapon = ?chosen, "far range choice");
    task.suggested_shoot_weapon = chosen;
}

pub fn middle_range(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
    task: &mut CombatTask,
) {
    let bot = ctx.bot;
    let distance = disposition.distance;
    let lg_range = laser_range();
    let mid_range_len = lg_range - CLOSE_RANGE;
    let mid_range_distance = distance - CLOSE_RANGE;
    let env = ctx.environment_factor();

    let ratio = disposition.kill_to_be_killed_ratio();
    if ratio < 0.75 {
        task.advance = true;
    } else if ratio > 1.5 {
        task.retreat = true;
    }

    let ready = |w: Weapon| bot.ready_to_fire(w) as f32;
    let mut scores = WeaponScores::new(&[
        (Weapon::RocketLauncher, bounded_fraction(ready(Weapon::RocketLauncher), 3.0)),
        (Weapon::Lasergun, bounded_fraction(ready(Weapon::Lasergun), 20.0)),
        (Weapon::Plasmagun, 0.9 * bounded_fraction(ready(Weapon::Plasmagun), 25.0)),
        (Weapon::Machinegun, 0.8 * bounded_fraction(ready(Weapon::Machinegun), 20.0)),
        (Weapon::Riotgun, 0.7 * bounded_fraction(ready(Weapon::Riotgun), 3.0)),
        (Weapon::GrenadeLauncher, 0.5 * bounded_fraction(ready(Weapon::GrenadeLauncher), 5.0)),
    ]);

    if task.advance {
        scores.scale(Weapon::RocketLauncher, 1.3);
        scores.scale(Weapon::GrenadeLauncher, 0.7);
        scores.scale(Weapon::Riotgun, 1.1);
    }
    if task.retreat {
        scores.scale(Weapon::Plasmagun, 1.5);
        scores.scale(Weapon::Lasergun, 1.1);
        scores.scale(Weapon::Machinegun, 1.1);
        scores.scale(Weapon::GrenadeLauncher, 1.1);
    }

    // 1 at the far bound, ~0 at the close bound.
    let distance_factor = (distance - 250.0) / (lg_range - 250.0);
    scores.scale(Weapon::RocketLauncher, 1.0 - 0.7 * distance_factor);
    scores.scale(Weapon::Lasergun, 0.6 + 0.4 * distance_factor);
    scores.scale(Weapon::Plasmagun, 1.0 - 0.4 * distance_factor);
    scores.scale(Weapon::Machinegun, 0.3 + 0.7 * distance_factor);
    scores.scale(Weapon::Riotgun, 1.0 - 0.7 * distance_factor);
    // Grenades peak in the middle of the bracket.
    scores.scale(
        Weapon::GrenadeLauncher,
        1.0 - (mid_range_distance - mid_range_len / 2.0).abs() / mid_range_distance,
    );

    scores.scale(Weapon::RocketLauncher, env);
    scores.scale(Weapon::Lasergun, 1.0 - 0.5 * env);
    scores.scale(Weapon::Plasmagun, 0.5 + 0.5 * env);
    scores.scale(Weapon::Machinegun, 1.0 - env);
    scores.scale(Weapon::Riotgun, 1.0 - 0.5 * env);
    scores.scale(Weapon::GrenadeLauncher, env);

    let mut chosen = ctx.choose(&scores);

    let opp_lasers = opponent.ready_to_fire(Weapon::Lasergun);
    let opp_plasmas = opponent.ready_to_fire(Weapon::Plasmagun);
    let opp_rockets = opponent.ready_to_fire(Weapon::RocketLauncher);
    let opp_shells = opponent.ready_to_fire(Weapon::Riotgun);

    // Correct tactics for the chosen weapon.
    match chosen {
        Some(Weapon::RocketLauncher) => {
            if !task.retreat {
                task.advance = true;
            }
        }
        Some(Weapon::Lasergun) => {
            if opp_rockets > 0 || opp_plasmas > 0 || opp_shells > 0 {
                // Knockback ruins laser aim; keep just inside laser range.
                if distance + 125.0 > lg_range {
                    task.advance = true;
                } else if distance + 250.0 < lg_range {
                    task.retreat = true;
                }
            } else if !task.retreat {
                task.advance = true;
            }
        }
        Some(Weapon::Plasmagun) => {
            if (opp_rockets == 0 || env < 0.4) && !task.retreat {
                task.advance = true;
            }
        }
        Some(Weapon::Machinegun) => {
            if opp_lasers > 5 || opp_plasmas > 5 || opp_shells > 0 || opp_rockets > 0 {
                task.retreat = true;
            } else if distance < 1.75 * CLOSE_RANGE {
                if opponent.pending_weapon == Some(Weapon::Electrobolt) {
                    task.advance = true;
                } else {
                    task.retreat = true;
                }
            }
        }
        Some(Weapon::Riotgun) => {
            if opp_lasers > 5 || opp_plasmas > 5 {
                if !task.advance {
                    task.retreat = true;
                }
            } else if (opp_rockets == 0 || env < 0.5) && !task.retreat {
                task.advance = true;
            }
        }
        Some(Weapon::GrenadeLauncher) => {
            if opp_lasers > 5 || opp_plasmas > 5 {
                task.retreat = true;
            } else if distance < lg_range / 2.0 && env < 0.75 {
                task.retreat = true;
            } else if !task.retreat {
                task.advance = true;
            }
        }
        _ => {
            if bot.ready_to_fire(Weapon::Electrobolt) > 0 {
                chosen = Some(Weapon::Electrobolt);
                if !task.advance {
                    task.retreat = true;
                }
            }
        }
    }

    debug!(bot = %bot.handle, opponent = %opponent.handle, %scores, weapon = ?chosen, "middle range choice");
    task.suggested_shoot_weapon = chosen;
}

pub fn close_range(
    ctx: &mut AdvisorContext<'_>,
    opponent: &Combatant,
    disposition: &CombatDisposition,
    task: &mut CombatTask,
) {
    let bot = ctx.bot;
    let lasers = bot.ready_to_fire(Weapon::Lasergun);
    let rockets = bot.ready_to_fire(Weapon::RocketLauncher);
    let plasmas = bot.ready_to_fire(Weapon::Plasmagun);

    let mut chosen = None;
    if ctx.config.allow_self_damage {
        // Prefer lasers over explosives.
        if lasers > 10 {
            chosen = Some(Weapon::Lasergun);
        } else if plasmas > 10 && disposition.damage_to_be_killed > 50.0 {
            chosen = Some(Weapon::Plasmagun);
            task.retreat = true;
        } else if rockets > 0 && disposition.damage_to_be_killed > 80.0 {
            chosen = Some(Weapon::RocketLauncher);
            task.retreat = true;
        }
    } else if plasmas > 10 {
        chosen = Some(Weapon::Plasmagun);
        task.advance = true;
    } else if rockets > 0 {
        chosen = Some(Weapon::RocketLauncher);
        task.advance = true;
    } else if lasers > 10 {
        chosen = Some(Weapon::Lasergun);
        // Others will come at us with explosives.
        task.retreat = true;
    }

    if chosen.is_none() {
        let weapon = if bot.ready_to_fire(Weapon::Riotgun) > 0 {
            Weapon::Riotgun
        } else if ctx.rng.gen::<f32>() < ctx.skill && bot.ready_to_fire(Weapon::Electrobolt) > 0 {
            task.retreat = true;
            Weapon::Electrobolt
        } else if bot.ready_to_fire(Weapon::Machinegun) > 0 {
            task.retreat = true;
            Weapon::Machinegun
        } else if lasers > 0 {
            task.retreat = true;
            Weapon::Lasergun
        } else if plasmas > 0 && disposition.damage_to_be_killed > 35.0 {
            task.retreat = true;
            Weapon::Plasmagun
        } else {
            if disposition.kill_to_be_killed_ratio() < 0.33 {
                task.advance = true;
            } else {
                task.retreat = true;
            }
            Weapon::Gunblade
        };
        chosen = Some(weapon);
    }

    debug!(bot = %bot.handle, opponent = %opponent.handle, weapon = ?chosen, "close range choice");
    task.suggested_shoot_weapon = chosen;
}
