//! Weapon & tactics advisor.
//!
//! Given the task's opponent, scores the bot's usable weapons and sets the
//! suggested weapon plus advance/retreat/inhibit flags on the combat task.

pub mod overrides;
pub mod ranges;
pub mod scores;
pub mod spam;
pub mod special;

use rand_chacha::ChaCha8Rng;
use skirmish_core::constants::SKILL_EASY;
use skirmish_core::enums::Weapon;
use skirmish_core::types::{EntityHandle, Vec3};

use crate::config::BrainConfig;
use crate::environment::TargetEnvironment;
use crate::memory::TrackedOpponent;
use crate::task::CombatTask;
use crate::weighting::CombatDisposition;
use crate::world::{Combatant, Tracer};

pub use ranges::RangeBracket;
pub use scores::WeaponScores;

/// Everything an advisor routine may read, plus the brain's random sources.
pub struct AdvisorContext<'a> {
    pub bot: &'a Combatant,
    /// Memory record of the task's opponent.
    pub tracked: &'a TrackedOpponent,
    pub config: &'a BrainConfig,
    pub skill: f32,
    pub now: u64,
    pub weapon_score_random: f32,
    pub decision_random: f32,
    pub environment: &'a mut TargetEnvironment,
    pub tracer: &'a dyn Tracer,
    pub rng: &'a mut ChaCha8Rng,
}

impl AdvisorContext<'_> {
    /// Factor of the last environment probe.
    pub fn environment_factor(&self) -> f32 {
        self.environment.factor
    }

    /// Re-probe the environment around `toward`.
    pub fn probe_environment(&mut self, toward: Vec3, excluded: Option<EntityHandle>) -> f32 {
        self.environment
            .probe(self.tracer, self.bot.origin, toward, excluded)
    }

    /// Pick by scores, keeping the pending weapon unless something is clearly better.
    pub fn choose(&self, scores: &WeaponScores) -> Option<Weapon> {
        scores.choose_with_hysteresis(self.bot.pending_weapon, self.weapon_score_random)
    }
}

/// Choose a weapon and tactics for engaging `opponent`.
pub fn suggest_aim_weapon_and_tactics(
    ctx: &mut AdvisorContext,
    opponent: &Combatant,
    task: &mut CombatTask,
) {
    if ctx.skill < SKILL_EASY {
        task.suggested_shoot_weapon = special::easy_bot_weapon(ctx, opponent);
    } else {
        let toward = ctx.tracked.last_seen_position();
        ctx.probe_environment(toward, Some(opponent.handle));

        if ctx.config.instagib {
            task.suggested_shoot_weapon = special::instagib_weapon(ctx);
        } else if ctx.bot.has_quad() {
            task.suggested_shoot_weapon = special::quad_bearer_weapon(ctx);
        } else {
            let disposition = CombatDisposition::new(ctx.bot, opponent, toward, ctx.config);
            let routine = RangeBracket::classify(disposition.distance).routine();
            routine(ctx, opponent, &disposition, task);
        }
    }

    if task.suggested_shoot_weapon.is_none() {
        task.suggested_shoot_weapon = Some(Weapon::Gunblade);
    }
}
