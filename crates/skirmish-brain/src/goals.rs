//! Item goal weights: how much a bot wants to pick up an item right now.

use skirmish_core::enums::{ArmorKind, HealthKind, ItemKind, Weapon};
use skirmish_core::weapons::{weapon_def, Inventory};

const TOP_TIER_WEAPONS: [Weapon; 4] = [
    Weapon::Electrobolt,
    Weapon::Lasergun,
    Weapon::RocketLauncher,
    Weapon::Plasmagun,
];

/// Desire for an item, given the bot's inventory and vitals.
pub fn compute_item_weight(
    item: ItemKind,
    inventory: &impl Inventory,
    health: f32,
    max_health: f32,
    armor: f32,
) -> f32 {
    match item {
        ItemKind::Weapon(weapon) => weapon_weight(weapon, inventory),
        ItemKind::Ammo(weapon) => ammo_weight(weapon, inventory),
        ItemKind::Health(kind) => health_weight(kind, health, max_health),
        ItemKind::Armor(kind) => armor_weight(kind, armor),
        ItemKind::Powerup => 3.5,
    }
}

/// Ammo deficit in [0, 1], `None` when the ammo is full.
fn ammo_deficit(weapon: Weapon, inventory: &impl Inventory) -> Option<f32> {
    let max = weapon_def(weapon).max_ammo;
    let ammo = inventory.ammo(weapon);
    if ammo >= max {
        return None;
    }
    Some(1.0 - ammo as f32 / max as f32)
}

fn owned_weapon_factor(weapon: Weapon) -> f32 {
    match weapon {
        Weapon::Electrobolt | Weapon::RocketLauncher => 1.0,
        Weapon::Lasergun | Weapon::Plasmagun => 1.1,
        _ => 0.5,
    }
}

fn weapon_weight(weapon: Weapon, inventory: &impl Inventory) -> f32 {
    if inventory.has_weapon(weapon) {
        return ammo_deficit(weapon, inventory)
            .map(|deficit| deficit * owned_weapon_factor(weapon))
            .unwrap_or(0.0);
    }

    let only_melee = inventory.only_melee();
    if TOP_TIER_WEAPONS.contains(&weapon) {
        let greed = TOP_TIER_WEAPONS
            .iter()
            .filter(|w| !inventory.has_weapon(**w))
            .count() as f32;
        let base = if only_melee { 1.5 } else { 0.9 };
        return base + (greed - 1.0) / 3.0;
    }

    if only_melee {
        1.5
    } else {
        0.7
    }
}

fn ammo_weight(weapon: Weapon, inventory: &impl Inventory) -> f32 {
    let Some(deficit) = ammo_deficit(weapon, inventory) else {
        return 0.0;
    };
    if inventory.has_weapon(weapon) {
        deficit * owned_weapon_factor(weapon)
    } else {
        deficit * 0.33
    }
}

fn health_weight(kind: HealthKind, health: f32, max_health: f32) -> f32 {
    let deficit = 1.0 - health / max_health;
    match kind {
        HealthKind::Mega | HealthKind::Ultra => 2.5,
        HealthKind::Small => 0.2 + 0.3 * deficit,
        _ => deficit.max(0.0),
    }
}

fn armor_weight(kind: ArmorKind, armor: f32) -> f32 {
    match kind {
        ArmorKind::Red if armor < 150.0 => 2.0,
        ArmorKind::Yellow if armor < 125.0 => 1.7,
        ArmorKind::Green if armor < 100.0 => 1.4,
        ArmorKind::Shard if armor < 25.0 || armor >= 150.0 => 0.4,
        ArmorKind::Shard => 0.25,
        _ => 0.0,
    }
}
