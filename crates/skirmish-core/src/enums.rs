//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Weapon identifier.
///
/// The absence of a weapon is modeled as `Option<Weapon>::None`, never as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weapon {
    /// Default melee weapon, always available and never out of ammo.
    Gunblade,
    Machinegun,
    Riotgun,
    GrenadeLauncher,
    RocketLauncher,
    Plasmagun,
    Lasergun,
    Electrobolt,
    Instagun,
}

impl Weapon {
    pub const COUNT: usize = 9;

    pub const ALL: [Weapon; Weapon::COUNT] = [
        Weapon::Gunblade,
        Weapon::Machinegun,
        Weapon::Riotgun,
        Weapon::GrenadeLauncher,
        Weapon::RocketLauncher,
        Weapon::Plasmagun,
        Weapon::Lasergun,
        Weapon::Electrobolt,
        Weapon::Instagun,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        crate::weapons::weapon_def(self).name
    }
}

/// Coarse range classes used by the legacy range-weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyRange {
    Melee,
    Short,
    Medium,
    Long,
}

impl LegacyRange {
    /// Classify a distance the way the legacy weapon table expects.
    pub fn classify(distance: f32) -> Self {
        if distance < 150.0 {
            LegacyRange::Melee
        } else if distance < 500.0 {
            LegacyRange::Short
        } else if distance < 900.0 {
            LegacyRange::Medium
        } else {
            LegacyRange::Long
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Health pickup kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthKind {
    Small,
    Medium,
    Large,
    Mega,
    Ultra,
}

/// Armor pickup kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorKind {
    Shard,
    Green,
    Yellow,
    Red,
}

/// Pickup item kinds scored by the goal weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(Weapon),
    /// Ammo pack for the given weapon.
    Ammo(Weapon),
    Health(HealthKind),
    Armor(ArmorKind),
    Powerup,
}

/// Current combat posture of a bot, as exposed in snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMode {
    #[default]
    Idle,
    Aiming,
    Suppressing,
}

/// Movement bias emitted alongside a combat task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveBias {
    #[default]
    Hold,
    Advance,
    Retreat,
}

/// Match state (top-level).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Shooting disabled, bots still perceive nothing.
    #[default]
    Countdown,
    Playtime,
    Finished,
}
