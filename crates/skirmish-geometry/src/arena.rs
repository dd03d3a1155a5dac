//! ArenaGeometry: solid brushes, visibility zones and spawn points.

use skirmish_core::types::{TraceResult, Vec3};

use crate::brush::Brush;
use crate::zones::ZoneMap;

/// Static geometry of one arena.
#[derive(Debug, Clone)]
pub struct ArenaGeometry {
    pub name: String,
    pub brushes: Vec<Brush>,
    pub zones: ZoneMap,
    /// Combatant origins used for (re)spawning.
    pub spawn_points: Vec<Vec3>,
}

impl ArenaGeometry {
    pub fn new(name: &str, brushes: Vec<Brush>, zones: ZoneMap, spawn_points: Vec<Vec3>) -> Self {
        Self {
            name: name.to_string(),
            brushes,
            zones,
            spawn_points,
        }
    }

    /// Sweep a box (`mins`/`maxs` relative to its center) from `start` to `end`
    /// and report the first solid contact.
    pub fn trace_box(&self, start: Vec3, mins: Vec3, maxs: Vec3, end: Vec3) -> TraceResult {
        let mut result = TraceResult::clear(end);
        for brush in &self.brushes {
            let Some(hit) = brush.sweep(start, end, mins, maxs) else {
                continue;
            };
            if hit.start_solid {
                return TraceResult {
                    fraction: 0.0,
                    end_pos: start,
                    start_solid: true,
                };
            }
            if hit.fraction < result.fraction {
                result.fraction = hit.fraction;
            }
        }
        if result.hit_something() {
            result.end_pos = start + (end - start) * result.fraction;
        }
        result
    }

    /// Trace a zero-size ray.
    pub fn trace_line(&self, start: Vec3, end: Vec3) -> TraceResult {
        self.trace_box(start, Vec3::ZERO, Vec3::ZERO, end)
    }

    /// Whether a point lies inside any brush.
    pub fn point_in_solid(&self, point: Vec3) -> bool {
        self.brushes.iter().any(|b| b.contains(point))
    }

    /// Coarse potential visibility between two points.
    pub fn in_pvs(&self, a: Vec3, b: Vec3) -> bool {
        self.zones.in_pvs(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_arena() -> ArenaGeometry {
        ArenaGeometry::new(
            "test",
            vec![
                Brush::new(Vec3::new(-1000.0, -1000.0, -32.0), Vec3::new(1000.0, 1000.0, 0.0)),
                Brush::new(Vec3::new(-16.0, -200.0, 0.0), Vec3::new(16.0, 200.0, 300.0)),
            ],
            ZoneMap::open(),
            vec![],
        )
    }

    #[test]
    fn test_open_space_trace() {
        let arena = wall_arena();
        let tr = arena.trace_line(Vec3::new(-500.0, 500.0, 50.0), Vec3::new(500.0, 500.0, 50.0));
        assert_eq!(tr.fraction, 1.0);
        assert!(!tr.hit_something());
        assert_eq!(tr.end_pos, Vec3::new(500.0, 500.0, 50.0));
    }

    #[test]
    fn test_trace_stops_at_wall() {
        let arena = wall_arena();
        let tr = arena.trace_line(Vec3::new(-216.0, 0.0, 50.0), Vec3::new(184.0, 0.0, 50.0));
        assert!(tr.hit_something());
        assert!((tr.fraction - 0.5).abs() < 1e-4);
        assert!((tr.end_pos.x + 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_trace_into_floor() {
        let arena = wall_arena();
        let tr = arena.trace_box(
            Vec3::new(500.0, 500.0, 100.0),
            Vec3::splat(-10.0),
            Vec3::splat(10.0),
            Vec3::new(500.0, 500.0, -100.0),
        );
        assert!(tr.hit_something());
        assert!((tr.end_pos.z - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_start_solid_trace() {
        let arena = wall_arena();
        let tr = arena.trace_line(Vec3::new(0.0, 0.0, 50.0), Vec3::new(300.0, 0.0, 50.0));
        assert!(tr.start_solid);
        assert_eq!(tr.fraction, 0.0);
        assert!(arena.point_in_solid(Vec3::new(0.0, 0.0, 50.0)));
    }
}
