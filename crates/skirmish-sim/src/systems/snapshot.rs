//! Snapshot system: queries the ECS world and builds an ArenaSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_brain::BotBrain;
use skirmish_core::components::*;
use skirmish_core::enums::MatchPhase;
use skirmish_core::events::MatchEvent;
use skirmish_core::state::{ArenaSnapshot, CombatantView};
use skirmish_core::types::SimTime;

use crate::adapter::handle_of;

/// Build a complete ArenaSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    brains: &[BotBrain],
    time: &SimTime,
    phase: MatchPhase,
    events: Vec<MatchEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        combatants: build_combatants(world, brains),
        events,
    }
}

/// Build CombatantView list, sorted by handle.
fn build_combatants(world: &World, brains: &[BotBrain]) -> Vec<CombatantView> {
    let mut query = world.query::<(
        &Callsign,
        &Body,
        &Vitals,
        &Arsenal,
        &Affiliation,
        &Score,
        Option<&Ghost>,
        Option<&BotControlled>,
    )>();
    let mut views: Vec<CombatantView> = query
        .iter()
        .map(
            |(entity, (callsign, body, vitals, arsenal, affiliation, score, ghost, control))| {
                CombatantView {
                    handle: handle_of(entity),
                    name: callsign.name.clone(),
                    team: affiliation.team,
                    origin: body.origin,
                    velocity: body.velocity,
                    health: vitals.health,
                    armor: vitals.armor,
                    weapon: arsenal.pending_weapon,
                    frags: score.frags,
                    deaths: score.deaths,
                    ghosting: ghost.is_some(),
                    bot: control
                        .and_then(|c| brains.get(c.brain_slot))
                        .map(|b| b.task_view()),
                }
            },
        )
        .collect();

    views.sort_by_key(|v| v.handle);
    views
}
