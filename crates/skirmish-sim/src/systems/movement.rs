//! Movement system.
//!
//! Turns each bot toward its look-at point, sets velocity from the move
//! bias, integrates position with box traces against the arena brushes and
//! counts down weapon timers.

use hecs::World;

use skirmish_core::components::{Arsenal, Body, BotIntent, Ghost};
use skirmish_core::constants::{DT, FRAME_TIME_MS, PLAYER_HALF_EXTENTS, PLAYER_RUN_SPEED};
use skirmish_core::enums::MoveBias;
use skirmish_core::types::Vec3;
use skirmish_geometry::ArenaGeometry;

/// Advancing bots stop this close to their anchor.
const ADVANCE_STOP_DISTANCE: f32 = 200.0;

/// Run turning and kinematic integration for all live combatants.
pub fn run(world: &mut World, geometry: &ArenaGeometry) {
    let half = Vec3::from(PLAYER_HALF_EXTENTS);

    for (_entity, (body, intent, ghost)) in
        world.query_mut::<(&mut Body, &BotIntent, Option<&Ghost>)>()
    {
        if ghost.is_some() {
            continue;
        }

        if let Some(point) = intent.look_at {
            body.look_dir = turn_toward(body.look_dir, point - body.origin, intent.turn_speed);
        }

        body.velocity = move_velocity(body.origin, intent);
        if body.velocity == Vec3::ZERO {
            continue;
        }

        let end = body.origin + body.velocity * DT;
        let tr = geometry.trace_box(body.origin, -half, half, end);
        if tr.start_solid {
            body.velocity = Vec3::ZERO;
            continue;
        }
        body.origin = tr.end_pos;
        if tr.hit_something() {
            body.velocity = Vec3::ZERO;
        }
    }

    for (_entity, arsenal) in world.query_mut::<&mut Arsenal>() {
        arsenal.weapon_time_ms = arsenal.weapon_time_ms.saturating_sub(FRAME_TIME_MS as u32);
    }
}

/// Rotate `current` toward `desired` by a fraction of the remaining angle.
pub fn turn_toward(current: Vec3, desired: Vec3, turn_speed: f32) -> Vec3 {
    let Some(desired) = desired.try_normalize() else {
        return current;
    };
    let blended = current.lerp(desired, turn_speed.clamp(0.0, 1.0));
    blended.try_normalize().unwrap_or(desired)
}

/// Horizontal run velocity for a move bias relative to the intent's anchor.
fn move_velocity(origin: Vec3, intent: &BotIntent) -> Vec3 {
    let Some(anchor) = intent.move_anchor else {
        return Vec3::ZERO;
    };
    let delta = Vec3::new(anchor.x - origin.x, anchor.y - origin.y, 0.0);
    let direction = match intent.move_bias {
        MoveBias::Hold => return Vec3::ZERO,
        MoveBias::Advance if delta.length() <= ADVANCE_STOP_DISTANCE => return Vec3::ZERO,
        MoveBias::Advance => delta,
        MoveBias::Retreat => -delta,
    };
    direction.normalize_or_zero() * PLAYER_RUN_SPEED
}
