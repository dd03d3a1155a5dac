//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Per-combatant state lives in components; per-bot decision state lives in
//! the engine's brain table.

pub mod bot_control;
pub mod combat;
pub mod lifecycle;
pub mod movement;
pub mod snapshot;
