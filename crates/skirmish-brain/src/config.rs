//! Brain configuration and skill-derived parameters.

use serde::{Deserialize, Serialize};
use skirmish_core::constants::{MAX_TRACKED_ATTACKERS, MAX_TRACKED_ENEMIES, MAX_TRACKED_TARGETS};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("skill must be within [0, 1], got {0}")]
    SkillOutOfRange(f32),
    #[error("armor protection must be within [0, 1], got {0}")]
    ArmorProtectionOutOfRange(f32),
    #[error("armor degradation must not be negative, got {0}")]
    NegativeArmorDegradation(f32),
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
}

/// Game rules the decision engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Fraction of incoming damage absorbed by armor.
    pub armor_protection: f32,
    /// Armor points lost per absorbed damage point.
    pub armor_degradation: f32,
    /// Whether splash weapons can hurt their shooter.
    pub allow_self_damage: bool,
    /// Instagib rules (one-shot weapons only).
    pub instagib: bool,
    /// Team mode: teammates are never opponents.
    pub team_based: bool,
    /// World gravity (units/s²).
    pub gravity: f32,
    /// Lower score is better in this game mode.
    pub inverse_score: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            armor_protection: 0.66,
            armor_degradation: 0.66,
            allow_self_damage: true,
            instagib: false,
            team_based: false,
            gravity: 850.0,
            inverse_score: false,
        }
    }
}

impl BrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.armor_protection) {
            return Err(ConfigError::ArmorProtectionOutOfRange(self.armor_protection));
        }
        if self.armor_degradation.is_nan() || self.armor_degradation < 0.0 {
            return Err(ConfigError::NegativeArmorDegradation(self.armor_degradation));
        }
        if self.gravity.is_nan() || self.gravity <= 0.0 {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        Ok(())
    }
}

/// Parameters derived from the skill scalar. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub skill: f32,
    pub max_tracked_enemies: usize,
    pub max_tracked_attackers: usize,
    pub max_tracked_targets: usize,
    /// Delay before a newly seen opponent may be reacted to (ms).
    pub reaction_time: u64,
    pub aim_target_choice_period: u64,
    pub spam_target_choice_period: u64,
    pub aim_weapon_choice_period: u64,
    pub spam_weapon_choice_period: u64,
    /// Horizontal field of view (degrees).
    pub fov_degrees: f32,
}

impl SkillProfile {
    pub fn from_skill(skill: f32) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&skill) {
            return Err(ConfigError::SkillOutOfRange(skill));
        }
        let scaled = |max: usize, base: usize| base + ((max - base) as f32 * skill) as usize;
        let profile = Self {
            skill,
            max_tracked_enemies: scaled(MAX_TRACKED_ENEMIES, 3),
            max_tracked_attackers: scaled(MAX_TRACKED_ATTACKERS, 1),
            max_tracked_targets: scaled(MAX_TRACKED_TARGETS, 1),
            reaction_time: 32 + (300.0 * (1.0 - skill)) as u64,
            aim_target_choice_period: 1000 - (900.0 * skill) as u64,
            spam_target_choice_period: 1333 - (500.0 * skill) as u64,
            aim_weapon_choice_period: 1032 - (500.0 * skill) as u64,
            spam_weapon_choice_period: 1000 - (333.0 * skill) as u64,
            fov_degrees: 110.0 + 69.0 * skill,
        };
        // Two enemy slots must stay available for powerup holders and carriers.
        debug_assert!(profile.max_tracked_attackers + 2 <= profile.max_tracked_enemies);
        debug_assert!(profile.max_tracked_targets + 2 <= profile.max_tracked_enemies);
        Ok(profile)
    }

    /// Cosine of half the field of view.
    pub fn fov_dot_factor(&self) -> f32 {
        (self.fov_degrees / 2.0).to_radians().cos()
    }
}
