//! Line-of-sight queries against arena brushes.

use skirmish_core::types::Vec3;

use crate::arena::ArenaGeometry;

/// Points closer than this are always mutually visible.
const MIN_OCCLUSION_DISTANCE: f32 = 1.0;

/// Check line-of-sight between two points.
///
/// Returns true if a zero-size ray from `from` reaches `to` without
/// touching a brush.
pub fn has_line_of_sight(arena: &ArenaGeometry, from: Vec3, to: Vec3) -> bool {
    if from.distance_squared(to) < MIN_OCCLUSION_DISTANCE * MIN_OCCLUSION_DISTANCE {
        return true;
    }
    !arena.trace_line(from, to).hit_something()
}
