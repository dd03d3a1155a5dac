//! Built-in arena layouts.

use skirmish_core::constants::PLAYER_HALF_EXTENTS;
use skirmish_core::types::Vec3;

use crate::arena::ArenaGeometry;
use crate::brush::Brush;
use crate::zones::ZoneMap;

/// Names accepted by [`build_layout`].
pub const LAYOUT_NAMES: [&str; 2] = ["open_field", "corridors"];

const FLOOR_THICKNESS: f32 = 32.0;
const WALL_THICKNESS: f32 = 32.0;

/// Build a layout by name.
pub fn build_layout(name: &str) -> Option<ArenaGeometry> {
    match name {
        "open_field" => Some(open_field()),
        "corridors" => Some(corridors()),
        _ => None,
    }
}

/// Origin height of a combatant standing on the floor.
fn standing_z() -> f32 {
    PLAYER_HALF_EXTENTS[2] + 1.0
}

/// Floor plus four enclosing walls around `[mins, maxs]` (horizontal extent).
fn enclosure(mins: Vec3, maxs: Vec3, height: f32) -> Vec<Brush> {
    let t = WALL_THICKNESS;
    vec![
        Brush::new(
            Vec3::new(mins.x - t, mins.y - t, -FLOOR_THICKNESS),
            Vec3::new(maxs.x + t, maxs.y + t, 0.0),
        ),
        Brush::new(Vec3::new(mins.x - t, mins.y - t, 0.0), Vec3::new(mins.x, maxs.y + t, height)),
        Brush::new(Vec3::new(maxs.x, mins.y - t, 0.0), Vec3::new(maxs.x + t, maxs.y + t, height)),
        Brush::new(Vec3::new(mins.x, mins.y - t, 0.0), Vec3::new(maxs.x, mins.y, height)),
        Brush::new(Vec3::new(mins.x, maxs.y, 0.0), Vec3::new(maxs.x, maxs.y + t, height)),
    ]
}

/// Large square with four pillars. No zones.
fn open_field() -> ArenaGeometry {
    let half = 2048.0;
    let height = 512.0;
    let mut brushes = enclosure(Vec3::new(-half, -half, 0.0), Vec3::new(half, half, 0.0), height);
    for (x, y) in [(800.0, 800.0), (-800.0, 800.0), (800.0, -800.0), (-800.0, -800.0)] {
        brushes.push(Brush::new(
            Vec3::new(x - 64.0, y - 64.0, 0.0),
            Vec3::new(x + 64.0, y + 64.0, height),
        ));
    }

    let z = standing_z();
    let spawn_points = vec![
        Vec3::new(-1500.0, -1500.0, z),
        Vec3::new(1500.0, 1500.0, z),
        Vec3::new(-1500.0, 1500.0, z),
        Vec3::new(1500.0, -1500.0, z),
        Vec3::new(0.0, -1500.0, z),
        Vec3::new(0.0, 1500.0, z),
        Vec3::new(-1500.0, 0.0, z),
        Vec3::new(1500.0, 0.0, z),
    ];

    ArenaGeometry::new("open_field", brushes, ZoneMap::open(), spawn_points)
}

/// Three rooms in a row under a low ceiling. Doorways are offset and a
/// pillar in the middle room blocks every line through both doorways, so
/// the outer rooms never see each other.
fn corridors() -> ArenaGeometry {
    let height = 400.0;
    let mut brushes = enclosure(Vec3::ZERO, Vec3::new(3000.0, 1000.0, 0.0), height);
    // Ceiling.
    brushes.push(Brush::new(
        Vec3::new(0.0, 0.0, height),
        Vec3::new(3000.0, 1000.0, height + WALL_THICKNESS),
    ));
    // First wall, doorway at y 50..250.
    brushes.push(Brush::new(Vec3::new(984.0, 0.0, 0.0), Vec3::new(1016.0, 50.0, height)));
    brushes.push(Brush::new(Vec3::new(984.0, 250.0, 0.0), Vec3::new(1016.0, 1000.0, height)));
    // Second wall, doorway at y 750..950.
    brushes.push(Brush::new(Vec3::new(1984.0, 0.0, 0.0), Vec3::new(2016.0, 750.0, height)));
    brushes.push(Brush::new(Vec3::new(1984.0, 950.0, 0.0), Vec3::new(2016.0, 1000.0, height)));
    // Middle pillar.
    brushes.push(Brush::new(Vec3::new(1400.0, 300.0, 0.0), Vec3::new(1600.0, 700.0, height)));

    let mut zones = ZoneMap::open();
    let a = zones.add_zone("west", Brush::new(Vec3::ZERO, Vec3::new(984.0, 1000.0, height)));
    let b = zones.add_zone(
        "middle",
        Brush::new(Vec3::new(1016.0, 0.0, 0.0), Vec3::new(1984.0, 1000.0, height)),
    );
    let c = zones.add_zone(
        "east",
        Brush::new(Vec3::new(2016.0, 0.0, 0.0), Vec3::new(3000.0, 1000.0, height)),
    );
    zones.connect(a, b);
    zones.connect(b, c);

    let z = standing_z();
    let spawn_points = vec![
        Vec3::new(200.0, 200.0, z),
        Vec3::new(2800.0, 800.0, z),
        Vec3::new(200.0, 800.0, z),
        Vec3::new(2500.0, 200.0, z),
        Vec3::new(1200.0, 850.0, z),
        Vec3::new(1800.0, 150.0, z),
        Vec3::new(700.0, 500.0, z),
        Vec3::new(2300.0, 500.0, z),
    ];

    ArenaGeometry::new("corridors", brushes, zones, spawn_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_layouts_build() {
        for name in LAYOUT_NAMES {
            let arena = build_layout(name).unwrap();
            assert_eq!(arena.name, name);
            assert!(arena.spawn_points.len() >= 4);
        }
        assert!(build_layout("nonexistent").is_none());
    }

    #[test]
    fn test_spawn_points_not_in_solid() {
        let half = Vec3::from(PLAYER_HALF_EXTENTS);
        for name in LAYOUT_NAMES {
            let arena = build_layout(name).unwrap();
            for spawn in &arena.spawn_points {
                let tr = arena.trace_box(*spawn, -half, half, *spawn + Vec3::X);
                assert!(!tr.start_solid, "{name}: spawn {spawn} is in solid");
            }
        }
    }

    #[test]
    fn test_outer_rooms_not_in_pvs() {
        let arena = build_layout("corridors").unwrap();
        let west = Vec3::new(500.0, 500.0, 50.0);
        let middle = Vec3::new(1200.0, 500.0, 50.0);
        let east = Vec3::new(2500.0, 500.0, 50.0);
        assert!(arena.in_pvs(west, middle));
        assert!(arena.in_pvs(middle, east));
        assert!(!arena.in_pvs(west, east));
    }
}
