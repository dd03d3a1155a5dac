//! Events emitted by the simulation for the match log.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityHandle;

/// Damage applied to a combatant during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub attacker: EntityHandle,
    pub victim: EntityHandle,
    /// Damage before armor absorption.
    pub amount: f32,
    pub weapon: Weapon,
}

/// Match-level events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    /// A shot connected.
    Hit(DamageEvent),
    /// A combatant's health dropped to zero.
    Eliminated {
        victim: EntityHandle,
        killer: Option<EntityHandle>,
        weapon: Option<Weapon>,
    },
    /// A ghosting combatant re-entered the arena.
    Respawned { entity: EntityHandle },
    /// A combatant started raising another weapon.
    WeaponSwitched { entity: EntityHandle, weapon: Weapon },
    /// Match phase transition.
    PhaseChanged { phase: MatchPhase },
}
