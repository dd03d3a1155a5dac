//! Read-only weapon capability table and inventory queries.

use serde::{Deserialize, Serialize};

use crate::enums::{LegacyRange, Weapon};

/// Static capabilities of a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponDef {
    pub name: &'static str,
    /// Effective range in game units.
    pub range: f32,
    /// Damage of a single hit.
    pub damage: f32,
    /// Delay between shots (ms).
    pub refire_ms: u32,
    /// Whether hits deal area damage.
    pub splash: bool,
    /// Inventory cap for this weapon's ammo.
    pub max_ammo: u32,
    /// Legacy preference per coarse range (melee, short, medium, long).
    pub range_weights: [f32; 4],
}

impl WeaponDef {
    pub fn range_weight(&self, range: LegacyRange) -> f32 {
        self.range_weights[range.index()]
    }
}

/// Get the capability table entry for a weapon.
pub fn weapon_def(weapon: Weapon) -> WeaponDef {
    match weapon {
        Weapon::Gunblade => WeaponDef {
            name: "Gunblade",
            range: 150.0,
            damage: 35.0,
            refire_ms: 600,
            splash: false,
            max_ammo: 0,
            range_weights: [0.5, 0.1, 0.0, 0.0],
        },
        Weapon::Machinegun => WeaponDef {
            name: "Machinegun",
            range: 4000.0,
            damage: 8.0,
            refire_ms: 100,
            splash: false,
            max_ammo: 150,
            range_weights: [0.3, 0.5, 0.6, 0.5],
        },
        Weapon::Riotgun => WeaponDef {
            name: "Riotgun",
            range: 2000.0,
            damage: 60.0,
            refire_ms: 900,
            splash: false,
            max_ammo: 20,
            range_weights: [0.8, 0.7, 0.3, 0.1],
        },
        Weapon::GrenadeLauncher => WeaponDef {
            name: "Grenade Launcher",
            range: 1100.0,
            damage: 80.0,
            refire_ms: 800,
            splash: true,
            max_ammo: 20,
            range_weights: [0.2, 0.6, 0.5, 0.1],
        },
        Weapon::RocketLauncher => WeaponDef {
            name: "Rocket Launcher",
            range: 2000.0,
            damage: 80.0,
            refire_ms: 950,
            splash: true,
            max_ammo: 20,
            range_weights: [0.6, 0.9, 0.7, 0.3],
        },
        Weapon::Plasmagun => WeaponDef {
            name: "Plasmagun",
            range: 2500.0,
            damage: 15.0,
            refire_ms: 100,
            splash: true,
            max_ammo: 150,
            range_weights: [0.7, 0.8, 0.5, 0.2],
        },
        Weapon::Lasergun => WeaponDef {
            name: "Lasergun",
            range: 700.0,
            damage: 7.0,
            refire_ms: 50,
            splash: false,
            max_ammo: 150,
            range_weights: [0.7, 0.9, 0.6, 0.0],
        },
        Weapon::Electrobolt => WeaponDef {
            name: "Electrobolt",
            range: 6000.0,
            damage: 75.0,
            refire_ms: 1250,
            splash: false,
            max_ammo: 15,
            range_weights: [0.2, 0.4, 0.8, 0.9],
        },
        Weapon::Instagun => WeaponDef {
            name: "Instagun",
            range: 6000.0,
            damage: 200.0,
            refire_ms: 1300,
            splash: false,
            max_ammo: 15,
            range_weights: [0.9, 0.9, 0.9, 0.9],
        },
    }
}

/// Effective range of the reference mid-range weapon (the Lasergun).
pub fn laser_range() -> f32 {
    weapon_def(Weapon::Lasergun).range
}

/// Ammo and weapon possession queries.
pub trait Inventory {
    fn has_weapon(&self, weapon: Weapon) -> bool;

    fn ammo(&self, weapon: Weapon) -> u32;

    /// Shots available for a weapon, zero when the weapon is not owned.
    fn ready_to_fire(&self, weapon: Weapon) -> u32 {
        if self.has_weapon(weapon) {
            self.ammo(weapon)
        } else {
            0
        }
    }

    /// Whether the weapon can be fired right now. The Gunblade always can.
    fn can_fire(&self, weapon: Weapon) -> bool {
        weapon == Weapon::Gunblade || self.ready_to_fire(weapon) > 0
    }

    /// True when no weapon other than the Gunblade is owned.
    fn only_melee(&self) -> bool {
        Weapon::ALL
            .iter()
            .filter(|w| **w != Weapon::Gunblade)
            .all(|w| !self.has_weapon(*w))
    }
}

/// Weapons and ammo carried by a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    owned: [bool; Weapon::COUNT],
    ammo: [u32; Weapon::COUNT],
}

impl Default for Loadout {
    fn default() -> Self {
        let mut owned = [false; Weapon::COUNT];
        owned[Weapon::Gunblade.index()] = true;
        Self {
            owned,
            ammo: [0; Weapon::COUNT],
        }
    }
}

impl Loadout {
    /// Loadout with only the Gunblade.
    pub fn melee_only() -> Self {
        Self::default()
    }

    /// Every weapon with full ammo.
    pub fn full() -> Self {
        let mut loadout = Self::default();
        for weapon in Weapon::ALL {
            if weapon == Weapon::Instagun {
                continue;
            }
            loadout.give(weapon, weapon_def(weapon).max_ammo);
        }
        loadout
    }

    /// Add a weapon and some ammo for it.
    pub fn give(&mut self, weapon: Weapon, ammo: u32) {
        self.owned[weapon.index()] = true;
        self.add_ammo(weapon, ammo);
    }

    /// Add ammo, capped at the weapon's inventory maximum.
    pub fn add_ammo(&mut self, weapon: Weapon, ammo: u32) {
        let cap = weapon_def(weapon).max_ammo;
        let slot = &mut self.ammo[weapon.index()];
        *slot = slot.saturating_add(ammo).min(cap);
    }

    pub fn set_ammo(&mut self, weapon: Weapon, ammo: u32) {
        self.ammo[weapon.index()] = ammo.min(weapon_def(weapon).max_ammo);
    }

    pub fn remove(&mut self, weapon: Weapon) {
        if weapon != Weapon::Gunblade {
            self.owned[weapon.index()] = false;
        }
    }

    /// Spend one round. Returns false when nothing was left to spend.
    pub fn consume(&mut self, weapon: Weapon) -> bool {
        if weapon == Weapon::Gunblade {
            return true;
        }
        let slot = &mut self.ammo[weapon.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Inventory for Loadout {
    fn has_weapon(&self, weapon: Weapon) -> bool {
        self.owned[weapon.index()]
    }

    fn ammo(&self, weapon: Weapon) -> u32 {
        self.ammo[weapon.index()]
    }
}
