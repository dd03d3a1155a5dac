//! Fundamental geometric and simulation types.
//!
//! World space is Z-up, measured in game units. Time is measured in
//! simulation milliseconds.

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Weak, generation-checked reference to a simulated entity.
///
/// The bit layout matches `hecs::Entity::to_bits` (generation in the high
/// 32 bits, slot index in the low 32 bits), so a host ECS can round-trip
/// handles without a lookup table. Holding a handle never keeps the entity
/// alive; every read must re-validate it through the host's query interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

impl EntityHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    pub fn index(&self) -> u32 {
        self.0 as u32
    }

    pub fn generation(&self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub now_ms: u64,
}

impl SimTime {
    /// Milliseconds per tick at the default tick rate.
    pub fn dt_ms(&self) -> u64 {
        crate::constants::FRAME_TIME_MS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.now_ms += self.dt_ms();
    }
}

/// Result of a swept-box occlusion trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Fraction of the sweep completed before hitting a solid, in [0, 1].
    pub fraction: f32,
    /// Box center at the point the sweep stopped.
    pub end_pos: Vec3,
    /// Whether the sweep started inside a solid.
    pub start_solid: bool,
}

impl TraceResult {
    /// A trace that travelled the whole way without hitting anything.
    pub fn clear(end: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_pos: end,
            start_solid: false,
        }
    }

    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }
}

/// Active powerups of a combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerups {
    /// Damage amplifier (x4 outgoing damage).
    pub quad: bool,
    /// Protection amplifier (x1/4 incoming damage).
    pub shell: bool,
}

impl Powerups {
    pub fn any(&self) -> bool {
        self.quad || self.shell
    }
}

/// Orthonormal view axes derived from a look direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAxes {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl ViewAxes {
    /// Build axes from a look direction. A vertical or zero look direction
    /// falls back to looking along +X.
    pub fn from_look_dir(look_dir: Vec3) -> Self {
        let forward = look_dir.try_normalize().unwrap_or(Vec3::X);
        let right = forward
            .cross(Vec3::Z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y);
        let up = right.cross(forward);
        Self { forward, right, up }
    }
}

/// Fraction of `value` within `bound`, clamped to [0, 1].
pub fn bounded_fraction(value: f32, bound: f32) -> f32 {
    if bound <= 0.0 {
        return 1.0;
    }
    value.max(0.0).min(bound) / bound
}
