//! Perception filter: which opponents a bot sees this tick.

use crate::brain::BotBrain;
use crate::world::{ArenaView, Combatant};

/// Feed every opponent the bot can see into its memory, nearest first.
///
/// Candidates are prefiltered by field of view and capped at the memory
/// capacity before the costlier visibility checks run.
pub fn register_visible_opponents(brain: &mut BotBrain, view: &impl ArenaView, now: u64) {
    let Some(bot) = view.combatant(brain.handle()) else {
        return;
    };
    if bot.ghosting || !view.shooting_enabled() {
        return;
    }

    let dot_factor = brain.profile().fov_dot_factor();
    let team_based = brain.config().team_based;

    let mut candidates: Vec<(f32, Combatant)> = Vec::new();
    for handle in view.combatants() {
        if handle == bot.handle {
            continue;
        }
        let Some(opponent) = view.combatant(handle) else {
            continue;
        };
        if opponent.ghosting || opponent.no_target || opponent.busy {
            continue;
        }
        if team_based && opponent.team == bot.team {
            continue;
        }

        let to_opponent = opponent.origin - bot.origin;
        let distance_squared = to_opponent.length_squared();
        if distance_squared < 1.0 {
            continue;
        }
        let distance = distance_squared.sqrt();
        if (to_opponent / distance).dot(bot.look_dir) < dot_factor {
            continue;
        }
        candidates.push((distance, opponent));
    }

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates.truncate(brain.memory().capacity());

    for (_, opponent) in &candidates {
        if view.in_pvs(bot.origin, opponent.origin) && view.is_visible(bot.handle, opponent.handle) {
            brain.on_visible_opponent(view, opponent, now);
        }
    }

    brain.after_all_opponents_viewed(now);
}

