//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityHandle, Vec3};
use crate::weapons::Loadout;

/// Kinematic state of a combatant.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Body {
    /// Origin of the bounding box (game units, Z-up).
    pub origin: Vec3,
    /// Velocity (units/s).
    pub velocity: Vec3,
    /// Unit view direction.
    pub look_dir: Vec3,
}

/// Health and armor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
}

/// Weapons, ammo and the weapon currently being raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arsenal {
    pub loadout: Loadout,
    /// Weapon that is (or will be) in hand.
    pub pending_weapon: Option<Weapon>,
    /// Remaining time (ms) until the pending weapon can fire.
    pub weapon_time_ms: u32,
}

/// Team membership. Ignored outside team modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Affiliation {
    pub team: u8,
}

/// Marks the holder of the objective item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Carrier;

/// Entities that must not be picked as targets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TargetFlags {
    pub no_target: bool,
    pub busy: bool,
}

/// Eliminated combatant waiting to respawn. Present means ghosting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ghost {
    /// Simulation time (ms) at which the combatant respawns.
    pub respawn_at_ms: u64,
}

/// Match score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Score {
    pub frags: i32,
    pub deaths: u32,
}

/// Display name of a combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callsign {
    pub name: String,
}

/// Marks an entity driven by a decision engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotControlled {
    /// Index of the bot's brain in the engine's brain table.
    pub brain_slot: usize,
}

/// Per-tick output of bot control, consumed by movement and combat.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BotIntent {
    pub move_bias: MoveBias,
    /// Point the bot moves relative to (advance toward, retreat from).
    pub move_anchor: Option<Vec3>,
    /// Point the bot wants to look at.
    pub look_at: Option<Vec3>,
    /// Turn speed in [0, 1], fraction of the remaining angle per tick.
    pub turn_speed: f32,
    /// Entity the bot shoots at this tick.
    pub fire_at: Option<EntityHandle>,
    /// Location the bot shoots at blindly this tick.
    pub fire_at_spot: Option<Vec3>,
}
