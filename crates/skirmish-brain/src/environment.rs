//! Environment prober: how favorable the geometry around a point is for
//! splash weapons.

use skirmish_core::constants::{ENVIRONMENT_TRACE_BOX, ENVIRONMENT_TRACE_DEPTH};
use skirmish_core::types::{EntityHandle, Vec3};

use crate::world::Tracer;

/// Result of the last probe. 0 is open space, 1 is a tight spot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetEnvironment {
    pub factor: f32,
}

impl TargetEnvironment {
    /// Probe six directions around `toward` and cache the factor.
    pub fn probe(
        &mut self,
        tracer: &(impl Tracer + ?Sized),
        from: Vec3,
        toward: Vec3,
        excluded: Option<EntityHandle>,
    ) -> f32 {
        self.factor = probe_factor(tracer, from, toward, excluded);
        self.factor
    }
}

pub fn probe_factor(
    tracer: &(impl Tracer + ?Sized),
    from: Vec3,
    toward: Vec3,
    excluded: Option<EntityHandle>,
) -> f32 {
    let mut forward = toward - from;
    forward.z = 0.0;
    let forward = if forward.length_squared() > 1.0 {
        forward.normalize()
    } else {
        Vec3::X
    };
    let right = Vec3::Z.cross(forward);
    let up = Vec3::Z;

    let depth = ENVIRONMENT_TRACE_DEPTH;
    let half = Vec3::splat(ENVIRONMENT_TRACE_BOX);

    let mut sum = 0.0;
    for dir in [forward, -forward, right, -right, up, -up] {
        let trace = tracer.trace(toward, -half, half, toward + dir * depth, excluded);
        if trace.hit_something() {
            sum += 1.0 / 6.0;
        }
        if trace.fraction > 0.01 {
            let hit_to_target = (toward - trace.end_pos) / (depth * trace.fraction);
            sum += 1.5 * (1.0 - trace.fraction) * hit_to_target.dot(forward).abs();
        } else {
            sum += 1.5 * (1.0 - trace.fraction);
        }
    }

    (sum / 6.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::types::TraceResult;

    /// Everything is open.
    struct Void;

    impl Tracer for Void {
        fn trace(&self, _: Vec3, _: Vec3, _: Vec3, end: Vec3, _: Option<EntityHandle>) -> TraceResult {
            TraceResult::clear(end)
        }
    }

    /// Infinite floor at z = 0.
    struct Floor;

    impl Tracer for Floor {
        fn trace(&self, start: Vec3, mins: Vec3, _: Vec3, end: Vec3, _: Option<EntityHandle>) -> TraceResult {
            let bottom_start = start.z + mins.z;
            let bottom_end = end.z + mins.z;
            if bottom_end >= 0.0 {
                return TraceResult::clear(end);
            }
            let fraction = (bottom_start / (bottom_start - bottom_end)).clamp(0.0, 1.0);
            TraceResult {
                fraction,
                end_pos: start + (end - start) * fraction,
                start_solid: false,
            }
        }
    }

    /// Solid everywhere.
    struct Rock;

    impl Tracer for Rock {
        fn trace(&self, start: Vec3, _: Vec3, _: Vec3, _: Vec3, _: Option<EntityHandle>) -> TraceResult {
            TraceResult {
                fraction: 0.0,
                end_pos: start,
                start_solid: true,
            }
        }
    }

    #[test]
    fn test_open_space_is_zero() {
        let f = probe_factor(&Void, Vec3::ZERO, Vec3::new(500.0, 0.0, 0.0), None);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn test_floor_only_counts_hit() {
        // Floor 64 units below: the down trace hits at fraction (64 - 32) / 250.
        // Its direction is perpendicular to forward, so only the hit bonus counts.
        let f = probe_factor(&Floor, Vec3::new(0.0, 0.0, 64.0), Vec3::new(500.0, 0.0, 64.0), None);
        assert!((f - 1.0 / 36.0).abs() < 1e-5);
    }

    #[test]
    fn test_enclosed_saturates() {
        let f = probe_factor(&Rock, Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), None);
        assert_eq!(f, 1.0);
    }

    #[test]
    fn test_coincident_points_use_fallback_axis() {
        let mut env = TargetEnvironment::default();
        let f = env.probe(&Void, Vec3::ZERO, Vec3::new(0.0, 0.0, 300.0), None);
        assert_eq!(f, 0.0);
        assert_eq!(env.factor, 0.0);
    }
}
