//! Combat task arbitration: keep, replace or drop the current task.

use rand::Rng;
use skirmish_core::constants::{
    DECISION_RANDOM_PERIOD, FAST_SWITCH_RECHECK, LOOK_AT_TIMEOUT, LOST_ENEMY_TURN_WINDOW,
    NOT_SEEN_TIMEOUT, SKILL_EASY, SPAM_TIMEOUT, TARGET_CHOICE_DISTANCE_BOUNDS,
    WEAPON_SCORE_RANDOM_PERIOD,
};
use skirmish_core::types::{bounded_fraction, ViewAxes, Vec3};
use tracing::debug;

use crate::advisor::{self, overrides, spam, AdvisorContext};
use crate::brain::{BotBrain, PendingLookAt};
use crate::task::{CombatTask, TaskTarget, TrackedRef};
use crate::weighting::compute_raw_weight;
use crate::world::{ArenaView, Combatant, Tracer};

/// Target and weapon choices due within this window are pushed back after a fast switch.
const FAST_SWITCH_CHOICE_DELAY: u64 = 64;

impl BotBrain {
    /// Maintain memory, weights, timeouts and cached randoms before thinking.
    pub(crate) fn pre_think(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        let reaction_time = self.profile.reaction_time;
        let slots: Vec<usize> = self.memory.iter().map(|(slot, _)| slot).collect();

        for slot in slots {
            let Some(tracked) = self.memory.get(slot) else {
                continue;
            };
            let entity = tracked.entity;
            let last_seen_at = tracked.last_seen_at;
            let registered_at = tracked.registered_at;

            if now.saturating_sub(last_seen_at) > NOT_SEEN_TIMEOUT {
                debug!(bot = %self.handle, opponent = %entity, "opponent not seen for too long, forgetting");
                self.remove_opponent(slot, now);
                continue;
            }
            let opponent = match view.combatant(entity) {
                Some(opponent) if !opponent.ghosting => opponent,
                _ => {
                    debug!(bot = %self.handle, opponent = %entity, "opponent is gone, forgetting");
                    self.remove_opponent(slot, now);
                    continue;
                }
            };
            if opponent.no_target || opponent.busy {
                continue;
            }
            if registered_at + reaction_time > now {
                continue;
            }

            let weight = if now.saturating_sub(last_seen_at) > reaction_time {
                0.0
            } else {
                compute_raw_weight(
                    bot,
                    &opponent,
                    &self.attackers,
                    &self.targets,
                    &self.config,
                    now,
                )
            };
            if let Some(tracked) = self.memory.get_mut(slot) {
                tracked.set_weight(weight);
            }
        }

        if self.task.spam_opponent().is_some() && self.task.spam_times_out_at <= now {
            debug!(bot = %self.handle, "suppression timed out");
            self.task.reset();
            self.next_target_choice_at = now;
        }

        if self.next_weapon_score_random_at <= now {
            self.weapon_score_random = self.rng.gen::<f32>() * (1.0 - self.profile.skill) - 0.5;
            self.next_weapon_score_random_at = now + WEAPON_SCORE_RANDOM_PERIOD;
        }
        if self.next_decision_random_at <= now {
            self.decision_random = self.rng.gen::<f32>();
            self.next_decision_random_at = now + DECISION_RANDOM_PERIOD;
        }
    }

    pub(crate) fn think(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        if self.next_fast_switch_check_at <= now && self.check_fast_weapon_switch(view, bot, now) {
            self.next_fast_switch_check_at = now + FAST_SWITCH_RECHECK;
            if self.next_target_choice_at <= now + FAST_SWITCH_CHOICE_DELAY {
                self.next_target_choice_at += FAST_SWITCH_CHOICE_DELAY + 1;
            }
            if self.next_weapon_choice_at <= now + FAST_SWITCH_CHOICE_DELAY {
                self.next_weapon_choice_at += FAST_SWITCH_CHOICE_DELAY + 1;
            }
            return;
        }

        let reaction_time = self.profile.reaction_time;
        let aim_lost = self
            .task
            .aim_opponent()
            .and_then(|r| self.memory.get(r.slot))
            .is_some_and(|t| now.saturating_sub(t.last_seen_at) > reaction_time);

        if aim_lost {
            self.try_find_new_task(view, bot, now);
        } else if self.next_target_choice_at > now {
            self.update_kept_task(view, bot, now);
        } else {
            self.try_find_new_task(view, bot, now);
        }
    }

    /// Forget a memory slot, dropping the task if it referenced it.
    fn remove_opponent(&mut self, slot: usize, now: u64) {
        if self.task.references_slot(slot) {
            self.task.reset();
            self.task.prev_spam = None;
            self.next_target_choice_at = now + self.profile.reaction_time;
        }
        self.memory.remove(slot);
    }

    /// Run an advisor routine against the opponent remembered in `slot`.
    fn advise<R>(
        &mut self,
        tracer: &dyn Tracer,
        bot: &Combatant,
        slot: usize,
        now: u64,
        routine: impl FnOnce(&mut AdvisorContext<'_>, &mut CombatTask) -> R,
    ) -> Option<R> {
        let tracked = self.memory.get(slot)?;
        let mut ctx = AdvisorContext {
            bot,
            tracked,
            config: &self.config,
            skill: self.profile.skill,
            now,
            weapon_score_random: self.weapon_score_random,
            decision_random: self.decision_random,
            environment: &mut self.environment,
            tracer,
            rng: &mut self.rng,
        };
        Some(routine(&mut ctx, &mut self.task))
    }

    fn check_fast_weapon_switch(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) -> bool {
        let Some(aim) = self.task.aim_opponent() else {
            return false;
        };
        let Some(opponent) = view.combatant(aim.entity) else {
            return false;
        };
        let weapon = self
            .advise(view, bot, aim.slot, now, |ctx, _| {
                overrides::fast_switch_weapon(ctx, &opponent)
            })
            .flatten();

        match weapon {
            Some(weapon) => {
                self.task.suggested_shoot_weapon = Some(weapon);
                self.task.important_shot = true;
                true
            }
            None => false,
        }
    }

    fn suggest_aim_weapon(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        let Some(aim) = self.task.aim_opponent() else {
            return;
        };
        let Some(opponent) = view.combatant(aim.entity) else {
            return;
        };
        self.advise(view, bot, aim.slot, now, |ctx, task| {
            advisor::suggest_aim_weapon_and_tactics(ctx, &opponent, task)
        });
    }

    fn suggest_spam_weapon(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        let Some(target) = self.task.spam_opponent() else {
            return;
        };
        self.advise(view, bot, target.slot, now, spam::suggest_spam_weapon_and_tactics);
    }

    fn update_kept_task(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        if self.next_weapon_choice_at > now {
            return;
        }
        if self.task.aim_opponent().is_some() {
            self.next_weapon_choice_at = now + self.profile.aim_weapon_choice_period;
            self.suggest_aim_weapon(view, bot, now);
            debug!(bot = %self.handle, next_at = self.next_weapon_choice_at, "kept aim task, weapon revised");
        } else if self.task.spam_opponent().is_some() {
            self.next_weapon_choice_at = now + self.profile.spam_weapon_choice_period;
            self.suggest_spam_weapon(view, bot, now);
            debug!(bot = %self.handle, next_at = self.next_weapon_choice_at, "kept spam task, weapon revised");
        }
    }

    fn try_find_new_task(&mut self, view: &impl ArenaView, bot: &Combatant, now: u64) {
        let old_aim = self.task.aim_opponent();
        self.task.reset();

        let axes = ViewAxes::from_look_dir(bot.look_dir);
        let view_dir = (axes.forward + axes.right + axes.up).normalize_or_zero();

        let mut best = None;
        let mut best_score = 0.0;
        for (slot, tracked) in self.memory.iter() {
            // Opponents not seen this tick weigh zero.
            if tracked.weight == 0.0 {
                continue;
            }
            let Some(opponent) = view.combatant(tracked.entity) else {
                continue;
            };
            if opponent.ghosting {
                continue;
            }

            let to_opponent = opponent.origin - bot.origin;
            let distance = to_opponent.length();
            let direction = to_opponent.normalize_or_zero();
            let distance_factor =
                0.3 + 0.7 * bounded_fraction(distance, TARGET_CHOICE_DISTANCE_BOUNDS);
            let direction_factor = 0.7 + 0.3 * direction.dot(view_dir);

            let score = tracked.weight * distance_factor * direction_factor;
            if score > best_score {
                best_score = score;
                best = Some(TrackedRef {
                    slot,
                    entity: tracked.entity,
                });
            }
        }

        if let Some(target) = best {
            let damage_bound = self.target_damage_bound();
            self.targets.touch(target.entity, now, damage_bound);
            self.task.target = TaskTarget::Aiming(target);
            self.task.prev_spam = None;
            self.task.instance_id = self.next_instance_id();
            self.next_target_choice_at = now + self.profile.aim_target_choice_period;
            debug!(
                bot = %self.handle,
                opponent = %target.entity,
                score = best_score,
                next_at = self.next_target_choice_at,
                "found aim target"
            );
            self.suggest_aim_weapon(view, bot, now);
            return;
        }

        if self.look_at.is_some_and(|l| l.timeout_at > now) {
            debug!(bot = %self.handle, "already turning to a look-at point, deferring target choice");
            return;
        }
        if let Some(old_aim) = old_aim {
            if self.suggest_turn_to_lost_opponent(old_aim, now) {
                return;
            }
        }
        self.suggest_spam_task(view, bot, view_dir, now);
    }

    /// Turn toward where a just-lost aim target probably is.
    fn suggest_turn_to_lost_opponent(&mut self, lost: TrackedRef, now: u64) -> bool {
        let Some(tracked) = self.memory.get(lost.slot).filter(|t| t.entity == lost.entity) else {
            return false;
        };
        let not_seen_for = now.saturating_sub(tracked.last_seen_at);
        if not_seen_for > LOST_ENEMY_TURN_WINDOW {
            return false;
        }

        let mut velocity_dir = tracked.last_seen_velocity();
        if velocity_dir.length_squared() > 1.0 {
            velocity_dir = velocity_dir.normalize();
        }
        let point = tracked.last_seen_position() + velocity_dir * (not_seen_for as f32 / 1000.0);

        self.look_at = Some(PendingLookAt {
            point,
            turn_speed: 0.25 + 0.75 * self.profile.skill,
            timeout_at: now + LOOK_AT_TIMEOUT,
        });
        debug!(bot = %self.handle, opponent = %lost.entity, ?point, "turning to lost opponent");
        true
    }

    /// Suppress the most valuable opponent that is remembered but not visible.
    fn suggest_spam_task(&mut self, view: &impl ArenaView, bot: &Combatant, view_dir: Vec3, now: u64) {
        let skill = self.profile.skill;
        if skill < SKILL_EASY {
            return;
        }
        let timeout = ((NOT_SEEN_TIMEOUT - 1000) as f32 * skill) as u64;

        let mut best = None;
        let mut best_score = 0.0;
        for (slot, tracked) in self.memory.iter() {
            if tracked.weight != 0.0 {
                continue;
            }
            let candidate = TrackedRef {
                slot,
                entity: tracked.entity,
            };
            if self.task.prev_spam == Some(candidate) {
                continue;
            }

            let direction = (tracked.last_seen_position() - bot.origin).normalize_or_zero();
            let direction_factor = 0.3 + 0.7 * direction.dot(view_dir);
            let unseen_for = now.saturating_sub(tracked.last_seen_at) as f32;
            let time_factor = 1.0 - bounded_fraction(unseen_for, timeout as f32);

            let score = 0.5
                * (tracked.max_positive_weight + tracked.avg_positive_weight)
                * direction_factor
                * time_factor;
            if score > best_score {
                best_score = score;
                best = Some((candidate, tracked.last_seen_position()));
            }
        }

        let Some((opponent, spot)) = best else {
            // Otherwise the choice would be retried every tick.
            self.next_target_choice_at = now + self.profile.spam_target_choice_period / 2;
            return;
        };

        self.task.target = TaskTarget::Suppressing { opponent, spot };
        self.task.instance_id = self.next_instance_id();
        self.suggest_spam_weapon(view, bot, now);
        self.task.spam_times_out_at = now + SPAM_TIMEOUT;
        self.next_target_choice_at = now + self.profile.spam_target_choice_period;
        debug!(
            bot = %self.handle,
            opponent = %opponent.entity,
            ?spot,
            weapon = ?self.task.suggested_spam_weapon,
            "started suppression"
        );
    }
}
