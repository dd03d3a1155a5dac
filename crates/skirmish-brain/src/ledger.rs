//! Attacker and target ledgers.
//!
//! Two independent fixed-capacity pools: who damaged the bot, and whom the
//! bot damaged. Entries decay after a timeout and the least relevant entry
//! is overwritten when a pool is full.

use serde::{Deserialize, Serialize};
use skirmish_core::types::{bounded_fraction, EntityHandle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackStats {
    pub entity: EntityHandle,
    pub total_damage: f32,
    pub last_activity_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackLedger {
    entries: Vec<Option<AttackStats>>,
    timeout: u64,
}

impl AttackLedger {
    pub fn new(capacity: usize, timeout: u64) -> Self {
        Self {
            entries: vec![None; capacity],
            timeout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackStats> {
        self.entries.iter().flatten()
    }

    pub fn get(&self, entity: EntityHandle) -> Option<&AttackStats> {
        self.iter().find(|e| e.entity == entity)
    }

    pub fn contains(&self, entity: EntityHandle) -> bool {
        self.get(entity).is_some()
    }

    pub fn last_activity(&self, entity: EntityHandle) -> Option<u64> {
        self.get(entity).map(|e| e.last_activity_at)
    }

    /// 1 for an entry active right now, falling linearly to 0 at the timeout.
    pub fn recency(&self, entity: EntityHandle, now: u64) -> f32 {
        match self.last_activity(entity) {
            Some(at) => 1.0 - bounded_fraction(now.saturating_sub(at) as f32, self.timeout as f32),
            None => 0.0,
        }
    }

    /// Record damage from (or to) `entity`, taking a slot if needed.
    ///
    /// `damage_bound` is the total damage at which an entry stops being
    /// evictable by age alone.
    pub fn record_damage(&mut self, entity: EntityHandle, damage: f32, now: u64, damage_bound: f32) {
        let slot = self.slot_for(entity, now, damage_bound);
        let entry = self.entries[slot].get_or_insert(AttackStats {
            entity,
            total_damage: 0.0,
            last_activity_at: now,
        });
        entry.total_damage += damage;
        entry.last_activity_at = now;
    }

    /// Refresh the activity time of `entity`, taking a slot if needed.
    pub fn touch(&mut self, entity: EntityHandle, now: u64, damage_bound: f32) {
        let slot = self.slot_for(entity, now, damage_bound);
        let entry = self.entries[slot].get_or_insert(AttackStats {
            entity,
            total_damage: 0.0,
            last_activity_at: now,
        });
        entry.last_activity_at = now;
    }

    /// Add damage to an existing entry only. Returns whether it was present.
    pub fn add_damage(&mut self, entity: EntityHandle, damage: f32, now: u64) -> bool {
        match self.entries.iter_mut().flatten().find(|e| e.entity == entity) {
            Some(entry) => {
                entry.total_damage += damage;
                entry.last_activity_at = now;
                true
            }
            None => false,
        }
    }

    /// Clear entries whose last activity is older than the timeout.
    pub fn decay(&mut self, now: u64) {
        let timeout = self.timeout;
        for entry in &mut self.entries {
            if matches!(entry, Some(stats) if stats.last_activity_at + timeout < now) {
                *entry = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }

    /// Slot of an existing entry, else the first free slot, else the slot to overwrite.
    fn slot_for(&mut self, entity: EntityHandle, now: u64, damage_bound: f32) -> usize {
        let mut free = None;
        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                Some(stats) if stats.entity == entity => return i,
                None if free.is_none() => free = Some(i),
                _ => {}
            }
        }
        if let Some(i) = free {
            return i;
        }

        let mut best = 0;
        let mut best_score = 0.0;
        for (i, stats) in self.entries.iter().enumerate() {
            let Some(stats) = stats else { continue };
            let time_factor = now.saturating_sub(stats.last_activity_at) as f32 / self.timeout as f32;
            let damage_factor = 1.0 - bounded_fraction(stats.total_damage, damage_bound);
            // Always positive, so some entry is always evicted.
            let score = 0.1 + time_factor * damage_factor;
            if best_score < score {
                best_score = score;
                best = i;
            }
        }
        tracing::trace!(slot = best, score = best_score, "overwriting ledger entry");
        self.entries[best] = None;
        best
    }
}
