//! Threat/opportunity weighting of tracked opponents.

use skirmish_core::constants::{MAX_DAMAGE_TO_KILL, MAX_ENEMY_WEIGHT};
use skirmish_core::types::Vec3;

use crate::config::BrainConfig;
use crate::ledger::AttackLedger;
use crate::world::Combatant;

/// Damage needed to kill a combatant with the given health and armor.
///
/// Returns `f32::INFINITY` when armor absorbs everything.
pub fn damage_to_kill(health: f32, armor: f32, protection: f32, degradation: f32) -> f32 {
    if armor <= 0.0 {
        return health;
    }
    if protection >= 1.0 {
        return f32::INFINITY;
    }
    if degradation > 0.0 {
        let damage_to_wipe_armor = armor / degradation;
        let health_damage_to_wipe_armor = damage_to_wipe_armor * (1.0 - protection);
        if health_damage_to_wipe_armor < health {
            return damage_to_wipe_armor + (health - health_damage_to_wipe_armor);
        }
    }
    health / (1.0 - protection)
}

/// Damage to kill a combatant under the configured armor rules.
pub fn combatant_damage_to_kill(combatant: &Combatant, config: &BrainConfig) -> f32 {
    damage_to_kill(
        combatant.health,
        combatant.armor,
        config.armor_protection,
        config.armor_degradation,
    )
}

/// Ephemeral facts about a bot versus one opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatDisposition {
    pub damage_to_kill: f32,
    pub damage_to_be_killed: f32,
    pub distance: f32,
}

impl CombatDisposition {
    /// Build from the bot, the opponent and where the opponent was last seen.
    pub fn new(
        bot: &Combatant,
        opponent: &Combatant,
        last_seen_position: Vec3,
        config: &BrainConfig,
    ) -> Self {
        let mut damage_to_be_killed = combatant_damage_to_kill(bot, config);
        if bot.has_shell() {
            damage_to_be_killed /= 4.0;
        }
        if opponent.has_quad() {
            damage_to_be_killed *= 4.0;
        }
        let mut damage_to_kill = combatant_damage_to_kill(opponent, config);
        if opponent.has_shell() {
            damage_to_kill *= 4.0;
        }
        Self {
            damage_to_kill,
            damage_to_be_killed,
            distance: last_seen_position.distance(bot.origin),
        }
    }

    /// Kill-to-be-killed damage ratio. Greater than 1 means the opponent is tougher.
    pub fn kill_to_be_killed_ratio(&self) -> f32 {
        let ratio = self.damage_to_kill / self.damage_to_be_killed;
        if ratio.is_nan() {
            // inf/inf and 0/0: nobody has the edge
            1.0
        } else {
            ratio
        }
    }
}

/// Raw weight of an opponent in [0, MAX_ENEMY_WEIGHT].
pub fn compute_raw_weight(
    bot: &Combatant,
    opponent: &Combatant,
    attackers: &AttackLedger,
    targets: &AttackLedger,
    config: &BrainConfig,
    now: u64,
) -> f32 {
    if opponent.ghosting {
        return 0.0;
    }

    let mut weight = 0.5;
    weight += 0.75 * attackers.recency(opponent.handle, now);
    weight += 1.55 * targets.recency(opponent.handle, now);
    if opponent.carrier {
        weight += 2.0;
    }

    let has_quad = bot.has_quad();
    let has_shell = bot.has_shell();

    let mut damage_to_kill = combatant_damage_to_kill(opponent, config);
    if has_quad && !opponent.has_shell() {
        damage_to_kill /= 4.0;
    }
    let mut damage_to_be_killed = combatant_damage_to_kill(bot, config);
    if has_shell && !opponent.has_quad() {
        damage_to_be_killed /= 4.0;
    }

    let lethality = (damage_to_be_killed - damage_to_kill) / MAX_DAMAGE_TO_KILL;
    // inf - inf: both sides unkillable, lethality is neutral
    if !lethality.is_nan() {
        weight += lethality;
    }

    if weight > 0.0 {
        if has_quad {
            weight *= 1.5;
        }
        if has_shell {
            weight += 0.5;
        }
        if has_quad && has_shell {
            weight *= 1.5;
        }
    }

    weight.clamp(0.0, MAX_ENEMY_WEIGHT)
}
