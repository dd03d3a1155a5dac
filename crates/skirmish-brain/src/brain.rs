//! Per-bot decision state and the callbacks the host drives it with.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::constants::{ATTACKER_TIMEOUT, TARGET_TIMEOUT};
use skirmish_core::state::BotTaskView;
use skirmish_core::types::{EntityHandle, Powerups, Vec3};
use tracing::{debug, info};

use crate::config::{BrainConfig, ConfigError, SkillProfile};
use crate::environment::TargetEnvironment;
use crate::ledger::AttackLedger;
use crate::memory::{EnemyMemory, EvictionQuery, Observation};
use crate::task::CombatTask;
use crate::weighting::compute_raw_weight;
use crate::world::{ArenaView, Combatant, EntityQuery};

/// Damage at which an attacker entry stops being evictable by age alone.
pub(crate) const ATTACKER_DAMAGE_BOUND: f32 = 500.0;

/// Same for target entries, before the quad scale.
pub(crate) const TARGET_DAMAGE_BOUND: f32 = 300.0;

/// A point the host should turn the bot toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLookAt {
    pub point: Vec3,
    /// Fraction of the full turn speed in [0, 1].
    pub turn_speed: f32,
    pub timeout_at: u64,
}

/// Decision state of one bot.
///
/// Owns its memory, ledgers and combat task. The host calls [`BotBrain::on_tick`]
/// once per frame, then runs perception, then reads the task back.
#[derive(Debug, Clone)]
pub struct BotBrain {
    pub(crate) handle: EntityHandle,
    pub(crate) profile: SkillProfile,
    pub(crate) config: BrainConfig,
    pub(crate) memory: EnemyMemory,
    pub(crate) attackers: AttackLedger,
    pub(crate) targets: AttackLedger,
    pub(crate) task: CombatTask,
    pub(crate) environment: TargetEnvironment,
    pub(crate) look_at: Option<PendingLookAt>,
    pub(crate) next_instance_id: u32,
    pub(crate) next_target_choice_at: u64,
    pub(crate) next_weapon_choice_at: u64,
    pub(crate) next_fast_switch_check_at: u64,
    pub(crate) prev_think_at: u64,
    pub(crate) weapon_score_random: f32,
    pub(crate) next_weapon_score_random_at: u64,
    pub(crate) decision_random: f32,
    pub(crate) next_decision_random_at: u64,
    /// Own powerups as of the last tick; scales target ledger bounds.
    pub(crate) own_powerups: Powerups,
    pub(crate) rng: ChaCha8Rng,
}

impl BotBrain {
    pub fn new(
        handle: EntityHandle,
        skill: f32,
        config: BrainConfig,
        seed: u64,
        now: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = SkillProfile::from_skill(skill)?;
        debug!(
            bot = %handle,
            skill,
            enemies = profile.max_tracked_enemies,
            reaction_time = profile.reaction_time,
            "brain created"
        );
        Ok(Self {
            handle,
            memory: EnemyMemory::new(profile.max_tracked_enemies),
            attackers: AttackLedger::new(profile.max_tracked_attackers, ATTACKER_TIMEOUT),
            targets: AttackLedger::new(profile.max_tracked_targets, TARGET_TIMEOUT),
            profile,
            config,
            task: CombatTask::default(),
            environment: TargetEnvironment::default(),
            look_at: None,
            next_instance_id: 1,
            next_target_choice_at: now,
            next_weapon_choice_at: now,
            next_fast_switch_check_at: now,
            prev_think_at: now,
            weapon_score_random: 0.0,
            next_weapon_score_random_at: now,
            decision_random: 0.5,
            next_decision_random_at: now,
            own_powerups: Powerups::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Run one decision pass: forget stale opponents, reweigh the rest and
    /// keep or replace the combat task.
    pub fn on_tick(&mut self, view: &impl ArenaView, now: u64) {
        let Some(bot) = view.combatant(self.handle) else {
            return;
        };
        self.own_powerups = bot.powerups;
        self.attackers.decay(now);
        self.targets.decay(now);
        self.pre_think(view, &bot, now);
        self.think(view, &bot, now);
        self.prev_think_at = now;
    }

    /// Register a sighting of an opponent that passed perception.
    pub fn on_visible_opponent(
        &mut self,
        view: &impl EntityQuery,
        opponent: &Combatant,
        now: u64,
    ) -> Observation {
        let Some(bot) = view.combatant(self.handle) else {
            return Observation::Dropped;
        };

        let skill = self.profile.skill;
        let decision_random = self.decision_random;
        let prev_think_at = self.prev_think_at;
        let (config, attackers, targets) = (&self.config, &self.attackers, &self.targets);
        let observation = self.memory.observe(opponent, now, || EvictionQuery {
            bot_origin: bot.origin,
            new_weight: compute_raw_weight(&bot, opponent, attackers, targets, config, now),
            distance_to_new: bot.origin.distance(opponent.origin),
            new_is_attacker: attackers.contains(opponent.handle),
            skill,
            decision_random,
            prev_think_at,
            attackers,
            targets,
        });

        match observation {
            Observation::Refreshed { .. } => {}
            Observation::Stored { slot } => {
                debug!(bot = %self.handle, opponent = %opponent.handle, slot, "stored new opponent");
            }
            Observation::Evicted { slot, evicted } => {
                debug!(
                    bot = %self.handle,
                    opponent = %opponent.handle,
                    %evicted,
                    slot,
                    "evicted opponent to make room"
                );
                if self.task.references_slot(slot) {
                    self.task.reset();
                    self.task.prev_spam = None;
                    self.next_target_choice_at = now;
                }
            }
            Observation::Dropped => {
                debug!(bot = %self.handle, opponent = %opponent.handle, "every slot outranks new opponent");
            }
        }
        observation
    }

    /// Stop suppressing once a reactable opponent is in view.
    pub fn after_all_opponents_viewed(&mut self, now: u64) {
        if self.task.spam_opponent().is_some()
            && self
                .memory
                .has_reactable_in_view(now, self.profile.reaction_time)
        {
            debug!(bot = %self.handle, "opponent in view, stop suppressing");
            self.task.reset();
            self.next_target_choice_at = now;
        }
    }

    pub fn on_damage_taken(&mut self, attacker: EntityHandle, amount: f32, now: u64) {
        if attacker == self.handle {
            return;
        }
        self.attackers
            .record_damage(attacker, amount, now, ATTACKER_DAMAGE_BOUND);
    }

    pub fn on_damage_dealt(&mut self, target: EntityHandle, amount: f32, now: u64) {
        if target == self.handle {
            return;
        }
        if !self.targets.contains(target) {
            let damage_bound = self.target_damage_bound();
            self.targets.touch(target, now, damage_bound);
        }
        self.targets.add_damage(target, amount, now);
    }

    /// Forget everything from the previous life.
    pub fn on_respawn(&mut self, now: u64) {
        info!(bot = %self.handle, "respawned, resetting combat state");
        self.memory.clear();
        self.attackers.clear();
        self.targets.clear();
        self.task.clear();
        self.look_at = None;
        self.next_target_choice_at = now;
        self.next_weapon_choice_at = now;
        self.next_fast_switch_check_at = now;
        self.prev_think_at = now;
    }

    pub fn on_eliminated(&mut self) {
        self.task.clear();
        self.look_at = None;
    }

    /// The pending look-at turn for this tick. Expires once its timeout has passed.
    pub fn look_at_turn(&mut self, now: u64) -> Option<PendingLookAt> {
        let look_at = self.look_at?;
        if look_at.timeout_at <= now {
            self.look_at = None;
        }
        Some(look_at)
    }

    pub(crate) fn target_damage_bound(&self) -> f32 {
        if self.own_powerups.quad {
            TARGET_DAMAGE_BOUND * 4.0
        } else {
            TARGET_DAMAGE_BOUND
        }
    }

    pub(crate) fn next_instance_id(&mut self) -> u32 {
        let id = self.next_instance_id;
        self.next_instance_id = self.next_instance_id.wrapping_add(1);
        id
    }

    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub fn skill(&self) -> f32 {
        self.profile.skill
    }

    pub fn profile(&self) -> &SkillProfile {
        &self.profile
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn task(&self) -> &CombatTask {
        &self.task
    }

    pub fn pending_look_at(&self) -> Option<&PendingLookAt> {
        self.look_at.as_ref()
    }

    pub fn memory(&self) -> &EnemyMemory {
        &self.memory
    }

    pub fn attackers(&self) -> &AttackLedger {
        &self.attackers
    }

    pub fn targets(&self) -> &AttackLedger {
        &self.targets
    }

    pub fn environment_factor(&self) -> f32 {
        self.environment.factor
    }

    /// Summary of the combat task for snapshots.
    pub fn task_view(&self) -> BotTaskView {
        let opponent = self
            .task
            .aim_opponent()
            .or(self.task.spam_opponent())
            .map(|r| r.entity);
        BotTaskView {
            mode: self.task.mode(),
            opponent,
            spot: self.task.spam_spot(),
            shoot_weapon: self.task.suggested_shoot_weapon,
            spam_weapon: self.task.suggested_spam_weapon,
            move_bias: self.task.move_bias(),
            instance_id: self.task.instance_id,
            tracked_opponents: self.memory.len(),
        }
    }
}
