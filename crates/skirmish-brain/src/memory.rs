//! Enemy memory: fixed-capacity tracked-opponent slots with eviction.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use skirmish_core::constants::{
    EVICTION_MAX_DISTANCE_DIFF, MAX_TRACKED_POSITIONS, MIN_EVICTION_SCORE, NOT_SEEN_TIMEOUT,
    SKILL_FORGETFUL,
};
use skirmish_core::enums::Weapon;
use skirmish_core::types::{EntityHandle, Powerups, Vec3};

use crate::ledger::AttackLedger;
use crate::world::Combatant;

/// One observation of a tracked opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub position: Vec3,
    pub velocity: Vec3,
    pub timestamp: u64,
}

/// A remembered opponent. Lives in exactly one memory slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedOpponent {
    pub entity: EntityHandle,
    /// Current weight; zero means "not a combat candidate this tick".
    pub weight: f32,
    pub avg_positive_weight: f32,
    pub max_positive_weight: f32,
    pub positive_weights_count: u32,
    pub registered_at: u64,
    pub last_seen_at: u64,
    /// Newest first, at most MAX_TRACKED_POSITIONS entries.
    history: VecDeque<Sighting>,
    /// Flags cached from the last sighting.
    pub powerups: Powerups,
    pub carrier: bool,
    pub pending_weapon: Option<Weapon>,
}

impl TrackedOpponent {
    fn new(opponent: &Combatant, now: u64) -> Self {
        let mut tracked = Self {
            entity: opponent.handle,
            weight: 0.0,
            avg_positive_weight: 0.0,
            max_positive_weight: 0.0,
            positive_weights_count: 0,
            registered_at: now,
            last_seen_at: now,
            history: VecDeque::with_capacity(MAX_TRACKED_POSITIONS),
            powerups: opponent.powerups,
            carrier: opponent.carrier,
            pending_weapon: opponent.pending_weapon,
        };
        tracked.on_viewed(opponent, now);
        tracked
    }

    fn on_viewed(&mut self, opponent: &Combatant, now: u64) {
        if self.history.len() == MAX_TRACKED_POSITIONS {
            self.history.pop_back();
        }
        self.history.push_front(Sighting {
            position: opponent.origin,
            velocity: opponent.velocity,
            timestamp: now,
        });
        self.last_seen_at = now;
        self.powerups = opponent.powerups;
        self.carrier = opponent.carrier;
        self.pending_weapon = opponent.pending_weapon;
    }

    pub fn history(&self) -> impl Iterator<Item = &Sighting> {
        self.history.iter()
    }

    pub fn last_seen_position(&self) -> Vec3 {
        self.history.front().map(|s| s.position).unwrap_or(Vec3::ZERO)
    }

    pub fn last_seen_velocity(&self) -> Vec3 {
        self.history.front().map(|s| s.velocity).unwrap_or(Vec3::ZERO)
    }

    pub fn has_powerups(&self) -> bool {
        self.powerups.any()
    }

    pub fn has_quad(&self) -> bool {
        self.powerups.quad
    }

    pub fn has_shell(&self) -> bool {
        self.powerups.shell
    }

    /// Store a new weight and fold it into the positive-weight statistics.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
        if weight > self.max_positive_weight {
            self.max_positive_weight = weight;
        }
        if weight > 0.0 {
            let count = self.positive_weights_count as f32;
            self.avg_positive_weight = (self.avg_positive_weight * count + weight) / (count + 1.0);
            self.positive_weights_count += 1;
        }
    }
}

/// What happened to an observed opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Already tracked; history refreshed.
    Refreshed { slot: usize },
    /// Stored in a free slot.
    Stored { slot: usize },
    /// Stored by evicting another opponent.
    Evicted { slot: usize, evicted: EntityHandle },
    /// Not remembered this tick; every slot outranks it.
    Dropped,
}

/// Inputs of the eviction policy for one new opponent.
#[derive(Debug, Clone, Copy)]
pub struct EvictionQuery<'a> {
    pub bot_origin: Vec3,
    pub new_weight: f32,
    pub distance_to_new: f32,
    pub new_is_attacker: bool,
    pub skill: f32,
    pub decision_random: f32,
    pub prev_think_at: u64,
    pub attackers: &'a AttackLedger,
    pub targets: &'a AttackLedger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMemory {
    slots: Vec<Option<TrackedOpponent>>,
}

impl EnemyMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, slot: usize) -> Option<&TrackedOpponent> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut TrackedOpponent> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn find(&self, entity: EntityHandle) -> Option<usize> {
        self.iter().find(|(_, t)| t.entity == entity).map(|(i, _)| i)
    }

    /// Populated slots with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TrackedOpponent)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|t| (i, t)))
    }

    pub fn remove(&mut self, slot: usize) -> Option<TrackedOpponent> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Register a sighting of `opponent`.
    ///
    /// `eviction` is only evaluated when every slot is taken.
    pub fn observe<'a>(
        &mut self,
        opponent: &Combatant,
        now: u64,
        eviction: impl FnOnce() -> EvictionQuery<'a>,
    ) -> Observation {
        let mut free = None;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                Some(tracked) if tracked.entity == opponent.handle => {
                    tracked.on_viewed(opponent, now);
                    return Observation::Refreshed { slot: i };
                }
                None if free.is_none() => free = Some(i),
                _ => {}
            }
        }

        if let Some(slot) = free {
            self.slots[slot] = Some(TrackedOpponent::new(opponent, now));
            return Observation::Stored { slot };
        }

        match self.eviction_candidate(&eviction()) {
            Some(slot) => {
                let evicted = self.slots[slot]
                    .replace(TrackedOpponent::new(opponent, now))
                    .map(|t| t.entity)
                    .unwrap_or(opponent.handle);
                Observation::Evicted { slot, evicted }
            }
            None => Observation::Dropped,
        }
    }

    /// Pick the slot to overwrite for a new opponent, if any scores high enough.
    ///
    /// Attackers, targets, powerup holders and carriers are never evicted.
    pub fn eviction_candidate(&self, query: &EvictionQuery) -> Option<usize> {
        let mut candidate = None;
        let mut max_score = MIN_EVICTION_SCORE;

        for (i, slot) in self.iter() {
            if query.attackers.contains(slot.entity) || query.targets.contains(slot.entity) {
                continue;
            }
            if slot.has_powerups() || slot.carrier {
                continue;
            }

            let mut score = 0.0;
            if query.new_is_attacker {
                score += 0.5;
            }

            if query.new_weight > slot.weight {
                score += query.new_weight - slot.weight;
            } else if query.skill < SKILL_FORGETFUL && query.decision_random > query.skill {
                score += (1.0 - query.skill) * (-(slot.weight - query.new_weight)).exp();
            }

            // Forget far and long unseen opponents first.
            if slot.last_seen_at < query.prev_think_at {
                let unseen = (query.prev_think_at - slot.last_seen_at) as f32;
                let time_factor = unseen.min(NOT_SEEN_TIMEOUT as f32) / NOT_SEEN_TIMEOUT as f32;
                let distance_to_slot = slot.last_seen_position().distance(query.bot_origin);
                let distance_diff = (distance_to_slot - query.distance_to_new).max(0.0);
                let distance_factor =
                    distance_diff.min(EVICTION_MAX_DISTANCE_DIFF) / EVICTION_MAX_DISTANCE_DIFF;
                score += 1.0 - distance_factor;
                score += 2.0 - time_factor * (1.0 + distance_factor);
            }

            if score > max_score {
                max_score = score;
                candidate = Some(i);
            }
        }

        candidate
    }

    /// Whether an opponent seen this tick has been visible for at least the reaction time.
    pub fn has_reactable_in_view(&self, now: u64, reaction_time: u64) -> bool {
        self.iter().any(|(_, t)| {
            t.last_seen_at == now && t.history().any(|s| s.timestamp + reaction_time <= now)
        })
    }
}
