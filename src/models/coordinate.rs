//! Tagged coordinates.
//!
//! Tooth centers come from two incompatible spaces: absolute pixels on the
//! fixed chart canvas, and percent of the analysed image. Values carry their
//! space so a conversion is always an explicit call with a canvas in hand.

use serde::{Deserialize, Serialize};

use super::Point;

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl CanvasSize {
    /// Create a canvas size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A point tagged with the coordinate space it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", content = "point", rename_all = "camelCase")]
pub enum Coordinate {
    /// Pixel offsets against a fixed-size canvas
    AbsolutePixels(Point),
    /// Percent (0-100) of the image width and height
    PercentOfImage(Point),
}

impl Coordinate {
    /// Express the point as percent of `canvas`
    pub fn to_percent(self, canvas: CanvasSize) -> Point {
        match self {
            Coordinate::PercentOfImage(p) => p,
            Coordinate::AbsolutePixels(p) => Point::new(
                ratio(p.x, canvas.width) * 100.0,
                ratio(p.y, canvas.height) * 100.0,
            ),
        }
    }

    /// Express the point in pixels of `canvas`
    pub fn to_absolute(self, canvas: CanvasSize) -> Point {
        match self {
            Coordinate::AbsolutePixels(p) => p,
            Coordinate::PercentOfImage(p) => {
                Point::new(p.x / 100.0 * canvas.width, p.y / 100.0 * canvas.height)
            }
        }
    }

    /// True for [`Coordinate::PercentOfImage`]
    pub fn is_percent(&self) -> bool {
        matches!(self, Coordinate::PercentOfImage(_))
    }
}

fn ratio(value: f32, extent: f32) -> f32 {
    if extent > 0.0 { value / extent } else { 0.0 }
}
