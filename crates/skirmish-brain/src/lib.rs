//! Combat decision engine for SKIRMISH bots.
//!
//! Pure decision logic with no ECS dependency. The host feeds each
//! [`BotBrain`] per tick through the query traits in [`world`] and reads
//! back the combat task, the pending look-at point and the ledgers.

pub mod advisor;
pub mod arbiter;
pub mod brain;
pub mod config;
pub mod environment;
pub mod goals;
pub mod ledger;
pub mod memory;
pub mod perception;
pub mod task;
pub mod weighting;
pub mod world;

pub use brain::{BotBrain, PendingLookAt};
pub use config::{BrainConfig, ConfigError, SkillProfile};
pub use task::{CombatTask, TaskTarget, TrackedRef};
pub use world::{ArenaView, Combatant, EntityQuery, Tracer, Visibility};
