//! Axis-aligned solid brushes and swept-box intersection.

use serde::{Deserialize, Serialize};
use skirmish_core::types::Vec3;

/// Parallel-ray tolerance for the slab test.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub mins: Vec3,
    pub maxs: Vec3,
}

/// Where a swept box first touched a brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the sweep at first contact, in [0, 1].
    pub fraction: f32,
    /// The box already overlapped the brush at the start.
    pub start_solid: bool,
}

impl Brush {
    pub fn new(mins: Vec3, maxs: Vec3) -> Self {
        Self {
            mins: mins.min(maxs),
            maxs: mins.max(maxs),
        }
    }

    /// Brush centered at `center` with the given half extents.
    pub fn centered(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.mins).all() && point.cmple(self.maxs).all()
    }

    /// Sweep a box (`mins`/`maxs` relative to its center) from `start` to `end`.
    ///
    /// The brush is grown by the box extents and a ray is clipped against
    /// the three slabs of the grown brush.
    pub fn sweep(&self, start: Vec3, end: Vec3, mins: Vec3, maxs: Vec3) -> Option<SweepHit> {
        let grown_mins = self.mins - maxs;
        let grown_maxs = self.maxs - mins;
        let delta = end - start;

        let mut enter = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        for axis in 0..3 {
            let s = start[axis];
            let d = delta[axis];
            let (lo, hi) = (grown_mins[axis], grown_maxs[axis]);
            if d.abs() < PARALLEL_EPSILON {
                if s <= lo || s >= hi {
                    return None;
                }
                continue;
            }
            let mut t0 = (lo - s) / d;
            let mut t1 = (hi - s) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            enter = enter.max(t0);
            exit = exit.min(t1);
            if enter >= exit {
                return None;
            }
        }

        if exit <= 0.0 || enter >= 1.0 {
            return None;
        }
        if enter < 0.0 {
            return Some(SweepHit {
                fraction: 0.0,
                start_solid: true,
            });
        }
        Some(SweepHit {
            fraction: enter,
            start_solid: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_brush() -> Brush {
        Brush::new(Vec3::new(100.0, -50.0, -50.0), Vec3::new(200.0, 50.0, 50.0))
    }

    #[test]
    fn test_ray_hits_face() {
        let hit = unit_brush()
            .sweep(Vec3::ZERO, Vec3::new(400.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO)
            .unwrap();
        assert!((hit.fraction - 0.25).abs() < 1e-5);
        assert!(!hit.start_solid);
    }

    #[test]
    fn test_box_hits_earlier_than_ray() {
        let half = Vec3::splat(20.0);
        let hit = unit_brush()
            .sweep(Vec3::ZERO, Vec3::new(400.0, 0.0, 0.0), -half, half)
            .unwrap();
        assert!((hit.fraction - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_miss_beside_brush() {
        let hit = unit_brush().sweep(
            Vec3::new(0.0, 80.0, 0.0),
            Vec3::new(400.0, 80.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_stops_short_of_brush() {
        let hit = unit_brush().sweep(Vec3::ZERO, Vec3::new(90.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO);
        assert!(hit.is_none());
    }

    #[test]
    fn test_start_solid() {
        let hit = unit_brush()
            .sweep(
                Vec3::new(150.0, 0.0, 0.0),
                Vec3::new(400.0, 0.0, 0.0),
                Vec3::ZERO,
                Vec3::ZERO,
            )
            .unwrap();
        assert!(hit.start_solid);
        assert_eq!(hit.fraction, 0.0);
    }

    #[test]
    fn test_contains() {
        let b = unit_brush();
        assert!(b.contains(Vec3::new(150.0, 0.0, 0.0)));
        assert!(!b.contains(Vec3::ZERO));
    }
}
