//! Core types and definitions for SKIRMISH.
//!
//! This crate defines the vocabulary shared across all other crates:
//! handles, weapons, components, events, snapshots, and tuning constants.
//! It has no dependency on the ECS or on the decision engine.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
pub mod weapons;

#[cfg(test)]
mod tests;
