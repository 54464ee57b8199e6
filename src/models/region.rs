use serde::{Deserialize, Serialize};

use super::{Point, ToothNumber};

/// Inclusive pixel-space bounding box of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    /// Leftmost column
    pub min_x: usize,
    /// Topmost row
    pub min_y: usize,
    /// Rightmost column (inclusive)
    pub max_x: usize,
    /// Bottom row (inclusive)
    pub max_y: usize,
}

impl PixelBounds {
    /// Bounds of a single pixel
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow to contain (x, y)
    pub fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Rectangle in percent of image dimensions; `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentBox {
    /// Left edge, 0-100
    pub x: f32,
    /// Top edge, 0-100
    pub y: f32,
    /// Width, 0-100
    pub width: f32,
    /// Height, 0-100
    pub height: f32,
}

impl PercentBox {
    /// Create a box from raw percent values
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize pixel bounds against the image size.
    ///
    /// Result always lies within `[0, 100]` on both axes.
    pub fn from_pixels(bounds: &PixelBounds, image_width: usize, image_height: usize) -> Self {
        let w = image_width.max(1) as f32;
        let h = image_height.max(1) as f32;
        let x = pct(bounds.min_x as f32 / w);
        let y = pct(bounds.min_y as f32 / h);
        let right = pct((bounds.max_x + 1) as f32 / w);
        let bottom = pct((bounds.max_y + 1) as f32 / h);
        Self {
            x,
            y,
            width: (right - x).max(0.0),
            height: (bottom - y).max(0.0),
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point in percent
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when `p` lies inside the box, edges included
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

fn pct(fraction: f32) -> f32 {
    (fraction * 100.0).clamp(0.0, 100.0)
}

/// A bright region accepted by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedRegion {
    /// Unique within one detection run
    pub id: usize,
    /// Extent in percent of the image
    pub bounding_box: PercentBox,
    /// Number of clustered pixels
    pub pixel_area: usize,
    /// Heuristic score in `[0, 1]`
    pub confidence: f32,
    /// Position-derived FDI number
    pub assigned_tooth_number: ToothNumber,
}
