use serde::{Deserialize, Serialize};

/// 2D point with floating point coordinates.
///
/// Carries no unit on its own; see [`crate::models::Coordinate`] for the
/// tagged form used when the unit matters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Vector from `other` to `self`
    pub fn offset_from(&self, other: &Point) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }
}
