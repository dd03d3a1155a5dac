//! Arena simulation for SKIRMISH.
//!
//! Owns the hecs ECS world, runs bot brains and systems at a fixed tick
//! rate, and produces ArenaSnapshots. Headless and deterministic for a
//! given seed.

pub mod adapter;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use engine::{ArenaEngine, SimConfig, SimError};

#[cfg(test)]
mod tests;
