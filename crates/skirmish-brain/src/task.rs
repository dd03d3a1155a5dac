//! The combat task: a bot's current combat intention.

use serde::{Deserialize, Serialize};
use skirmish_core::enums::{MoveBias, TaskMode, Weapon};
use skirmish_core::types::{EntityHandle, Vec3};

use crate::memory::EnemyMemory;

/// Reference to a memory slot, valid while the slot still holds `entity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRef {
    pub slot: usize,
    pub entity: EntityHandle,
}

impl TrackedRef {
    pub fn is_valid(&self, memory: &EnemyMemory) -> bool {
        memory
            .get(self.slot)
            .is_some_and(|t| t.entity == self.entity)
    }
}

/// What the task is directed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum TaskTarget {
    #[default]
    Idle,
    /// Engage a visible opponent.
    Aiming(TrackedRef),
    /// Fire blindly at the spot an opponent was last seen.
    Suppressing { opponent: TrackedRef, spot: Vec3 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatTask {
    pub target: TaskTarget,
    pub suggested_shoot_weapon: Option<Weapon>,
    pub suggested_spam_weapon: Option<Weapon>,
    pub advance: bool,
    pub retreat: bool,
    /// Suppress combat movement (and shooting while suppressing).
    pub inhibit: bool,
    /// Set by fast weapon switch overrides.
    pub important_shot: bool,
    /// Suppression deadline (ms).
    pub spam_times_out_at: u64,
    /// Last suppressed opponent, skipped by the next suppression choice.
    pub prev_spam: Option<TrackedRef>,
    /// Changes whenever the active opponent or spot changes.
    pub instance_id: u32,
}

impl CombatTask {
    /// Drop the current intention, remembering the suppressed opponent.
    pub fn reset(&mut self) {
        self.prev_spam = self.spam_opponent();
        self.target = TaskTarget::Idle;
        self.suggested_shoot_weapon = None;
        self.suggested_spam_weapon = None;
        self.advance = false;
        self.retreat = false;
        self.inhibit = false;
        self.important_shot = false;
        self.spam_times_out_at = 0;
    }

    /// Reset and forget the previous suppression target too.
    pub fn clear(&mut self) {
        self.reset();
        self.prev_spam = None;
    }

    pub fn mode(&self) -> TaskMode {
        match self.target {
            TaskTarget::Idle => TaskMode::Idle,
            TaskTarget::Aiming(_) => TaskMode::Aiming,
            TaskTarget::Suppressing { .. } => TaskMode::Suppressing,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.target, TaskTarget::Idle)
    }

    pub fn aim_opponent(&self) -> Option<TrackedRef> {
        match self.target {
            TaskTarget::Aiming(r) => Some(r),
            _ => None,
        }
    }

    pub fn spam_opponent(&self) -> Option<TrackedRef> {
        match self.target {
            TaskTarget::Suppressing { opponent, .. } => Some(opponent),
            _ => None,
        }
    }

    pub fn spam_spot(&self) -> Option<Vec3> {
        match self.target {
            TaskTarget::Suppressing { spot, .. } => Some(spot),
            _ => None,
        }
    }

    /// Whether the task references the given memory slot.
    pub fn references_slot(&self, slot: usize) -> bool {
        self.aim_opponent().or(self.spam_opponent()).is_some_and(|r| r.slot == slot)
    }

    /// Weapon the bot should hold for this task.
    pub fn weapon(&self) -> Option<Weapon> {
        match self.target {
            TaskTarget::Idle => None,
            TaskTarget::Aiming(_) => self.suggested_shoot_weapon,
            TaskTarget::Suppressing { .. } => self.suggested_spam_weapon,
        }
    }

    pub fn move_bias(&self) -> MoveBias {
        if self.is_empty() || self.inhibit {
            return MoveBias::Hold;
        }
        match (self.advance, self.retreat) {
            (true, false) => MoveBias::Advance,
            (false, true) => MoveBias::Retreat,
            _ => MoveBias::Hold,
        }
    }
}
