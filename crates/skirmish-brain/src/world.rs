//! Narrow query interfaces the decision engine consumes from its host.

use skirmish_core::enums::Weapon;
use skirmish_core::types::{EntityHandle, Powerups, TraceResult, Vec3};
use skirmish_core::weapons::{Inventory, Loadout};

/// Point-in-time copy of everything the engine may read about a combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub handle: EntityHandle,
    pub origin: Vec3,
    pub velocity: Vec3,
    /// Unit view direction.
    pub look_dir: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub team: u8,
    pub powerups: Powerups,
    /// Holds the objective item.
    pub carrier: bool,
    pub pending_weapon: Option<Weapon>,
    /// Remaining time (ms) until the pending weapon can fire.
    pub weapon_time_ms: u32,
    pub score: i32,
    pub loadout: Loadout,
    pub ghosting: bool,
    pub no_target: bool,
    pub busy: bool,
}

impl Combatant {
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn has_quad(&self) -> bool {
        self.powerups.quad
    }

    pub fn has_shell(&self) -> bool {
        self.powerups.shell
    }
}

impl Inventory for Combatant {
    fn has_weapon(&self, weapon: Weapon) -> bool {
        self.loadout.has_weapon(weapon)
    }

    fn ammo(&self, weapon: Weapon) -> u32 {
        self.loadout.ammo(weapon)
    }
}

/// Entity lookup. Handles may be stale; lookups of dead entities return `None`.
pub trait EntityQuery {
    fn combatant(&self, handle: EntityHandle) -> Option<Combatant>;

    /// Every combatant currently in the arena.
    fn combatants(&self) -> Vec<EntityHandle>;

    /// Whether the host currently allows shooting (false during countdowns).
    fn shooting_enabled(&self) -> bool {
        true
    }
}

pub trait Visibility {
    /// Coarse potential visibility between two points.
    fn in_pvs(&self, from: Vec3, to: Vec3) -> bool;

    /// Line of sight from one combatant's eyes to another.
    fn is_visible(&self, viewer: EntityHandle, target: EntityHandle) -> bool;
}

pub trait Tracer {
    /// Sweep a box (`mins`/`maxs` relative to its center) from `start` to
    /// `end`, ignoring `ignore`.
    fn trace(
        &self,
        start: Vec3,
        mins: Vec3,
        maxs: Vec3,
        end: Vec3,
        ignore: Option<EntityHandle>,
    ) -> TraceResult;
}

/// Everything a brain needs from the host world.
pub trait ArenaView: EntityQuery + Visibility + Tracer {}

impl<T: EntityQuery + Visibility + Tracer> ArenaView for T {}
