//! Bot control system: runs each brain and turns its combat task into a
//! `BotIntent` plus weapon switches.

use hecs::{Entity, World};
use tracing::debug;

use skirmish_brain::perception::register_visible_opponents;
use skirmish_brain::world::EntityQuery;
use skirmish_brain::{BotBrain, TaskTarget};
use skirmish_core::components::*;
use skirmish_core::enums::Weapon;
use skirmish_core::events::MatchEvent;
use skirmish_core::weapons::Inventory;
use skirmish_geometry::ArenaGeometry;

use crate::adapter::{handle_of, ArenaWorldView};

/// Time to raise another weapon (ms).
pub const WEAPON_SWITCH_TIME_MS: u32 = 200;

/// Turn speed while tracking an aim target, before skill scaling.
const BASE_AIM_TURN_SPEED: f32 = 0.25;

struct Decision {
    entity: Entity,
    intent: BotIntent,
    switch_to: Option<Weapon>,
}

/// Run every live bot's brain for this tick.
pub fn run(
    world: &mut World,
    geometry: &ArenaGeometry,
    brains: &mut [BotBrain],
    shooting_enabled: bool,
    now: u64,
    events: &mut Vec<MatchEvent>,
) {
    let bots: Vec<(Entity, usize)> = world
        .query::<(&BotControlled, Option<&Ghost>)>()
        .iter()
        .filter(|(_, (_, ghost))| ghost.is_none())
        .map(|(entity, (control, _))| (entity, control.brain_slot))
        .collect();

    let mut decisions = Vec::with_capacity(bots.len());
    {
        let view = ArenaWorldView {
            world: &*world,
            geometry,
            shooting_enabled,
        };
        for (entity, slot) in bots {
            let Some(brain) = brains.get_mut(slot) else {
                continue;
            };
            brain.on_tick(&view, now);
            register_visible_opponents(brain, &view, now);
            if let Some(decision) = decide(brain, &view, entity, now) {
                decisions.push(decision);
            }
        }
    }

    // Apply intents
    for decision in decisions {
        if let Ok(mut intent) = world.get::<&mut BotIntent>(decision.entity) {
            *intent = decision.intent;
        }
        let Some(weapon) = decision.switch_to else {
            continue;
        };
        if let Ok(mut arsenal) = world.get::<&mut Arsenal>(decision.entity) {
            arsenal.pending_weapon = Some(weapon);
            arsenal.weapon_time_ms = arsenal.weapon_time_ms.max(WEAPON_SWITCH_TIME_MS);
        }
        debug!(bot = %handle_of(decision.entity), ?weapon, "weapon switch");
        events.push(MatchEvent::WeaponSwitched {
            entity: handle_of(decision.entity),
            weapon,
        });
    }
}

/// Derive the intent for one bot from its brain's task.
fn decide(
    brain: &mut BotBrain,
    view: &ArenaWorldView<'_>,
    entity: Entity,
    now: u64,
) -> Option<Decision> {
    let bot = view.combatant(handle_of(entity))?;
    let task = brain.task();
    let mut intent = BotIntent {
        move_bias: task.move_bias(),
        ..Default::default()
    };

    match task.target {
        TaskTarget::Idle => {}
        TaskTarget::Aiming(opponent) => {
            if let Some(target) = view.combatant(opponent.entity) {
                intent.move_anchor = Some(target.origin);
                intent.look_at = Some(target.origin);
                intent.turn_speed = BASE_AIM_TURN_SPEED + 0.5 * brain.skill();
                if !task.inhibit {
                    intent.fire_at = Some(opponent.entity);
                }
            }
        }
        TaskTarget::Suppressing { spot, .. } => {
            intent.move_anchor = Some(spot);
            intent.look_at = Some(spot);
            intent.turn_speed = BASE_AIM_TURN_SPEED + 0.25 * brain.skill();
            if !task.inhibit {
                intent.fire_at_spot = Some(spot);
            }
        }
    }

    let switch_to = task
        .weapon()
        .filter(|w| Some(*w) != bot.pending_weapon && bot.can_fire(*w));

    if let Some(turn) = brain.look_at_turn(now) {
        intent.look_at = Some(turn.point);
        intent.turn_speed = turn.turn_speed;
    }

    Some(Decision {
        entity,
        intent,
        switch_to,
    })
}
