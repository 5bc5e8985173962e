//! Wall collision and teleport lookup over the tile grid.

use std::collections::BTreeMap;

use daily_dungeon_core::{CellCoord, TileGrid};
use glam::Vec2;

/// Longest distance a body travels between two collision checks.
const SLIDE_STEP: f32 = 16.0;

/// Static geometry of the dungeon floor.
#[derive(Clone, Debug)]
pub(crate) struct Arena {
    grid: TileGrid,
    teleports: BTreeMap<CellCoord, CellCoord>,
}

impl Arena {
    /// Builds the arena and links teleport tiles pairwise in row-major order.
    pub(crate) fn new(grid: TileGrid) -> Self {
        let mut teleports = BTreeMap::new();
        for (first, second) in grid.teleport_pairs() {
            let _ = teleports.insert(first, second);
            let _ = teleports.insert(second, first);
        }
        Self { grid, teleports }
    }

    pub(crate) fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Reports whether the point lies on a walkable tile inside the map.
    pub(crate) fn is_walkable(&self, point: Vec2) -> bool {
        CellCoord::containing(point).map_or(false, |cell| self.grid.is_walkable(cell))
    }

    /// Moves a body by `displacement`, sliding along walls instead of
    /// entering them. Each axis is rejected independently so diagonal
    /// movement into a wall keeps its parallel component.
    pub(crate) fn slide(&self, from: Vec2, displacement: Vec2) -> Vec2 {
        let distance = displacement.length();
        if !distance.is_finite() || distance <= f32::EPSILON {
            return from;
        }

        let steps = (distance / SLIDE_STEP).ceil().max(1.0) as u32;
        let step = displacement / steps as f32;
        let mut position = from;
        for _ in 0..steps {
            let horizontal = Vec2::new(position.x + step.x, position.y);
            if self.is_walkable(horizontal) {
                position = horizontal;
            }
            let vertical = Vec2::new(position.x, position.y + step.y);
            if self.is_walkable(vertical) {
                position = vertical;
            }
        }
        position
    }

    /// Partner tile of a teleport, if `cell` is a linked teleport.
    pub(crate) fn teleport_exit(&self, cell: CellCoord) -> Option<CellCoord> {
        self.teleports.get(&cell).copied()
    }
}
