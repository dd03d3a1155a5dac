//! Arena state snapshot, produced by the simulation after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::{EntityHandle, SimTime, Vec3};

/// Complete visible arena state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub combatants: Vec<CombatantView>,
    /// Events raised during this tick.
    pub events: Vec<MatchEvent>,
}

impl ArenaSnapshot {
    pub fn combatant(&self, handle: EntityHandle) -> Option<&CombatantView> {
        self.combatants.iter().find(|c| c.handle == handle)
    }
}

/// One combatant as seen from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub handle: EntityHandle,
    pub name: String,
    pub team: u8,
    pub origin: Vec3,
    pub velocity: Vec3,
    pub health: f32,
    pub armor: f32,
    pub weapon: Option<Weapon>,
    pub frags: i32,
    pub deaths: u32,
    pub ghosting: bool,
    /// Decision state, present for bot-controlled combatants.
    pub bot: Option<BotTaskView>,
}

/// Summary of a bot's combat task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotTaskView {
    pub mode: TaskMode,
    pub opponent: Option<EntityHandle>,
    pub spot: Option<Vec3>,
    pub shoot_weapon: Option<Weapon>,
    pub spam_weapon: Option<Weapon>,
    pub move_bias: MoveBias,
    pub instance_id: u32,
    pub tracked_opponents: usize,
}
