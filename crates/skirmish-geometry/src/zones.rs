//! Zone-based potential visibility.
//!
//! An arena is split into box-shaped zones with a symmetric visibility
//! matrix. Points outside every zone are treated as potentially visible
//! from anywhere.

use serde::{Deserialize, Serialize};
use skirmish_core::types::Vec3;

use crate::brush::Brush;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub bounds: Brush,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneMap {
    pub zones: Vec<Zone>,
    /// visible[a][b]: whether anything in zone a may see zone b.
    visible: Vec<Vec<bool>>,
}

impl ZoneMap {
    /// A map without zones; every pair of points is potentially visible.
    pub fn open() -> Self {
        Self::default()
    }

    /// Add a zone visible only from itself. Returns its index.
    pub fn add_zone(&mut self, name: &str, bounds: Brush) -> usize {
        let index = self.zones.len();
        self.zones.push(Zone {
            name: name.to_string(),
            bounds,
        });
        for row in &mut self.visible {
            row.push(false);
        }
        let mut row = vec![false; index + 1];
        row[index] = true;
        self.visible.push(row);
        index
    }

    /// Mark two zones as mutually visible.
    pub fn connect(&mut self, a: usize, b: usize) {
        if a < self.zones.len() && b < self.zones.len() {
            self.visible[a][b] = true;
            self.visible[b][a] = true;
        }
    }

    pub fn zone_of(&self, point: Vec3) -> Option<usize> {
        self.zones.iter().position(|z| z.bounds.contains(point))
    }

    pub fn in_pvs(&self, a: Vec3, b: Vec3) -> bool {
        match (self.zone_of(a), self.zone_of(b)) {
            (Some(za), Some(zb)) => self.visible[za][zb],
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_rooms() -> ZoneMap {
        let mut map = ZoneMap::open();
        let a = map.add_zone("a", Brush::new(Vec3::ZERO, Vec3::new(100.0, 100.0, 100.0)));
        let b = map.add_zone(
            "b",
            Brush::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(200.0, 100.0, 100.0)),
        );
        let c = map.add_zone(
            "c",
            Brush::new(Vec3::new(200.0, 0.0, 0.0), Vec3::new(300.0, 100.0, 100.0)),
        );
        map.connect(a, b);
        map.connect(b, c);
        map
    }

    #[test]
    fn test_adjacent_zones_visible() {
        let map = three_rooms();
        assert!(map.in_pvs(Vec3::splat(50.0), Vec3::new(150.0, 50.0, 50.0)));
        assert!(map.in_pvs(Vec3::new(250.0, 50.0, 50.0), Vec3::new(150.0, 50.0, 50.0)));
    }

    #[test]
    fn test_distant_zones_hidden() {
        let map = three_rooms();
        assert!(!map.in_pvs(Vec3::splat(50.0), Vec3::new(250.0, 50.0, 50.0)));
    }

    #[test]
    fn test_outside_zones_is_visible() {
        let map = three_rooms();
        assert!(map.in_pvs(Vec3::splat(50.0), Vec3::new(-500.0, 0.0, 0.0)));
        assert!(ZoneMap::open().in_pvs(Vec3::ZERO, Vec3::splat(1e4)));
    }
}
