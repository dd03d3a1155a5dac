//! Static arena geometry for SKIRMISH.
//!
//! Solid brushes, swept-box traces, line of sight,
//! zone-based potential visibility and built-in layouts.

pub use skirmish_core as core;

pub mod arena;
pub mod brush;
pub mod layouts;
pub mod los;
pub mod zones;

// Re-export key types for convenience.
pub use arena::ArenaGeometry;
pub use brush::Brush;
pub use layouts::{build_layout, LAYOUT_NAMES};
pub use los::has_line_of_sight;
pub use zones::ZoneMap;
