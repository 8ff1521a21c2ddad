use serde::{Deserialize, Serialize};

use crate::config::playfield;

/// A point on the 512x384 playfield
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Center of the playfield
    pub const fn center() -> Self {
        Self::new(playfield::WIDTH / 2.0, playfield::HEIGHT / 2.0)
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Point at `distance` from here along `angle` (radians)
    pub fn polar(&self, angle: f64, distance: f64) -> Self {
        self.offset(angle.cos() * distance, angle.sin() * distance)
    }

    /// Clamp into the playfield, keeping `padding` free along every edge
    pub fn clamped(&self, padding: f64) -> Self {
        Self::new(
            self.x.clamp(padding, playfield::WIDTH - padding),
            self.y.clamp(padding, playfield::HEIGHT - padding),
        )
    }
}
