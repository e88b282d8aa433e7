//! World map bounds.
//!
//! The simulation core consumes width and height only: projectile
//! culling, spawn edges, and tower relocation clamping. Viewport and
//! screen-coordinate math live entirely in the frontend.

use serde::{Deserialize, Serialize};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::types::Position;

/// Rectangular world bounds: valid cells are [0, width) x [0, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
}

impl Default for GameMap {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl GameMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether a cell lies inside the world bounds.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Clamp a cell onto the nearest in-bounds cell.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, self.width - 1),
            pos.y.clamp(0, self.height - 1),
        )
    }

    /// Center cell of the map.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}
