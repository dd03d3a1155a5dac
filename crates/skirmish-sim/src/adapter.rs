//! Read-only view of the ECS world through the brain's query traits.
//!
//! Handles are the bits of `hecs::Entity`, so a stale handle resolves to
//! nothing once its entity is despawned or its slot reused.

use hecs::{Entity, World};

use skirmish_brain::world::{Combatant, EntityQuery, Tracer, Visibility};
use skirmish_core::components::*;
use skirmish_core::constants::PLAYER_VIEW_HEIGHT;
use skirmish_core::types::{EntityHandle, Powerups, TraceResult, Vec3};
use skirmish_geometry::{has_line_of_sight, ArenaGeometry};

pub fn handle_of(entity: Entity) -> EntityHandle {
    EntityHandle(entity.to_bits().get())
}

pub fn entity_of(handle: EntityHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

/// Eye position of a combatant standing at `origin`.
pub fn eye_of(origin: Vec3) -> Vec3 {
    origin + Vec3::new(0.0, 0.0, PLAYER_VIEW_HEIGHT)
}

/// Build a brain-facing copy of one combatant.
pub fn read_combatant(world: &World, entity: Entity) -> Option<Combatant> {
    let entity_ref = world.entity(entity).ok()?;
    let body = *entity_ref.get::<&Body>()?;
    let vitals = *entity_ref.get::<&Vitals>()?;
    let arsenal = entity_ref.get::<&Arsenal>()?;
    let team = entity_ref.get::<&Affiliation>().map(|a| a.team).unwrap_or(0);
    let flags = entity_ref
        .get::<&TargetFlags>()
        .map(|f| *f)
        .unwrap_or_default();
    let powerups = entity_ref
        .get::<&Powerups>()
        .map(|p| *p)
        .unwrap_or_default();
    let score = entity_ref.get::<&Score>().map(|s| s.frags).unwrap_or(0);

    Some(Combatant {
        handle: handle_of(entity),
        origin: body.origin,
        velocity: body.velocity,
        look_dir: body.look_dir,
        health: vitals.health,
        max_health: vitals.max_health,
        armor: vitals.armor,
        team,
        powerups,
        carrier: entity_ref.has::<Carrier>(),
        pending_weapon: arsenal.pending_weapon,
        weapon_time_ms: arsenal.weapon_time_ms,
        score,
        loadout: arsenal.loadout,
        ghosting: entity_ref.has::<Ghost>(),
        no_target: flags.no_target,
        busy: flags.busy,
    })
}

/// The world as one bot's brain sees it during a tick.
pub struct ArenaWorldView<'a> {
    pub world: &'a World,
    pub geometry: &'a ArenaGeometry,
    pub shooting_enabled: bool,
}

impl EntityQuery for ArenaWorldView<'_> {
    fn combatant(&self, handle: EntityHandle) -> Option<Combatant> {
        read_combatant(self.world, entity_of(handle)?)
    }

    fn combatants(&self) -> Vec<EntityHandle> {
        let mut handles: Vec<EntityHandle> = self
            .world
            .query::<(&Body, &Vitals)>()
            .iter()
            .map(|(entity, _)| handle_of(entity))
            .collect();
        handles.sort();
        handles
    }

    fn shooting_enabled(&self) -> bool {
        self.shooting_enabled
    }
}

impl Visibility for ArenaWorldView<'_> {
    fn in_pvs(&self, from: Vec3, to: Vec3) -> bool {
        self.geometry.in_pvs(from, to)
    }

    fn is_visible(&self, viewer: EntityHandle, target: EntityHandle) -> bool {
        let origin_of = |handle: EntityHandle| {
            let entity = entity_of(handle)?;
            self.world.get::<&Body>(entity).ok().map(|b| b.origin)
        };
        match (origin_of(viewer), origin_of(target)) {
            (Some(from), Some(to)) => has_line_of_sight(self.geometry, eye_of(from), eye_of(to)),
            _ => false,
        }
    }
}

impl Tracer for ArenaWorldView<'_> {
    // Arena traces only hit static brushes, so there is nothing to ignore.
    fn trace(
        &self,
        start: Vec3,
        mins: Vec3,
        maxs: Vec3,
        end: Vec3,
        _ignore: Option<EntityHandle>,
    ) -> TraceResult {
        self.geometry.trace_box(start, mins, maxs, end)
    }
}
