//! Simulation engine.
//!
//! `ArenaEngine` owns the hecs ECS world, the arena geometry and one
//! `BotBrain` per bot, runs all systems and produces `ArenaSnapshot`s.
//! Completely headless, enabling deterministic testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use skirmish_brain::{BotBrain, BrainConfig, ConfigError};
use skirmish_core::constants::RESPAWN_DELAY_MS;
use skirmish_core::enums::MatchPhase;
use skirmish_core::events::MatchEvent;
use skirmish_core::state::ArenaSnapshot;
use skirmish_core::types::SimTime;
use skirmish_geometry::{build_layout, ArenaGeometry};

use crate::systems;
use crate::world_setup;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown arena layout: {0}")]
    UnknownLayout(String),
    #[error("arena layout {0} has no spawn points")]
    NoSpawnPoints(String),
    #[error("a match needs at least one bot")]
    NoBots,
    #[error("no skill levels configured")]
    NoSkills,
    #[error("invalid brain configuration: {0}")]
    Brain(#[from] ConfigError),
    #[error("invalid simulation config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub bots: usize,
    /// Skill per bot, cycled when there are more bots than entries.
    pub skills: Vec<f32>,
    /// Built-in arena layout name.
    pub layout: String,
    /// Shooting is disabled until this much time has passed (ms).
    pub countdown_ms: u64,
    /// Match ends after this long (ms). Zero means no limit.
    pub time_limit_ms: u64,
    pub respawn_delay_ms: u64,
    /// Spawn with every weapon instead of the Gunblade only.
    pub full_loadout: bool,
    pub brain: BrainConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bots: 4,
            skills: vec![0.25, 0.5, 0.75, 1.0],
            layout: "open_field".to_string(),
            countdown_ms: 1000,
            time_limit_ms: 0,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            full_loadout: true,
            brain: BrainConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Skill of the bot with the given index.
    pub fn skill_for(&self, index: usize) -> f32 {
        self.skills[index % self.skills.len()]
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct ArenaEngine {
    world: World,
    geometry: ArenaGeometry,
    brains: Vec<BotBrain>,
    config: SimConfig,
    time: SimTime,
    phase: MatchPhase,
    rng: ChaCha8Rng,
    events: Vec<MatchEvent>,
}

impl ArenaEngine {
    /// Build the arena and spawn every bot.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let geometry =
            build_layout(&config.layout).ok_or_else(|| SimError::UnknownLayout(config.layout.clone()))?;
        if geometry.spawn_points.is_empty() {
            return Err(SimError::NoSpawnPoints(config.layout.clone()));
        }
        if config.bots == 0 {
            return Err(SimError::NoBots);
        }
        if config.skills.is_empty() {
            return Err(SimError::NoSkills);
        }
        config.brain.validate()?;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let brains = world_setup::spawn_bots(&mut world, &geometry, &config, &mut rng)?;

        info!(
            layout = %geometry.name,
            bots = brains.len(),
            seed = config.seed,
            "match created"
        );

        Ok(Self {
            world,
            geometry,
            brains,
            config,
            time: SimTime::default(),
            phase: MatchPhase::default(),
            rng,
            events: Vec::new(),
        })
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        if self.phase != MatchPhase::Finished {
            self.update_phase();
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.brains, &self.time, self.phase, events)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn geometry(&self) -> &ArenaGeometry {
        &self.geometry
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Brains of all bots, indexed by `BotControlled::brain_slot`.
    pub fn brains(&self) -> &[BotBrain] {
        &self.brains
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Apply a hit outside of weapon fire (for tests).
    #[cfg(test)]
    pub fn apply_test_damage(&mut self, hit: skirmish_core::events::DamageEvent) -> bool {
        systems::combat::apply_damage(
            &mut self.world,
            &mut self.brains,
            &self.config,
            hit,
            self.time.now_ms,
            &mut self.events,
        )
    }

    fn update_phase(&mut self) {
        let now = self.time.now_ms;
        let next = match self.phase {
            MatchPhase::Countdown if now >= self.config.countdown_ms => MatchPhase::Playtime,
            MatchPhase::Playtime
                if self.config.time_limit_ms > 0 && now >= self.config.time_limit_ms =>
            {
                MatchPhase::Finished
            }
            phase => phase,
        };
        if next != self.phase {
            info!(phase = ?next, now, "match phase changed");
            self.phase = next;
            self.events.push(MatchEvent::PhaseChanged { phase: next });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        if self.phase == MatchPhase::Finished {
            return;
        }
        let now = self.time.now_ms;
        let shooting_enabled = self.phase == MatchPhase::Playtime;

        // 1. Respawn ghosts whose delay ran out
        systems::lifecycle::run(
            &mut self.world,
            &self.geometry,
            &mut self.brains,
            &self.config,
            &mut self.rng,
            now,
            &mut self.events,
        );
        // 2. Brains think and perceive, intents are written back
        systems::bot_control::run(
            &mut self.world,
            &self.geometry,
            &mut self.brains,
            shooting_enabled,
            now,
            &mut self.events,
        );
        // 3. Turning, movement and weapon timers
        systems::movement::run(&mut self.world, &self.geometry);
        // 4. Hitscan fire and damage resolution
        if shooting_enabled {
            systems::combat::run(
                &mut self.world,
                &self.geometry,
                &mut self.brains,
                &self.config,
                &mut self.rng,
                now,
                &mut self.events,
            );
        }
    }
}
