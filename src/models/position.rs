use serde::{Deserialize, Serialize};

use super::{DetectedRegion, PercentBox, Point, ToothNumber};
use crate::chart;

/// Where a tooth position originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSource {
    /// Converted from the absolute-pixel chart table
    Chart,
    /// Produced by the region detector
    Detected,
    /// Placed or edited by hand
    #[default]
    Manual,
}

/// Editable placement of one tooth over the reference image, in percent units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToothPosition {
    /// Identifier unique within a layout
    pub id: String,
    /// FDI number
    pub number: ToothNumber,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Degrees in `[0, 360)`
    #[serde(default)]
    pub rotation: f32,
    /// Origin of the values
    #[serde(default)]
    pub source: PositionSource,
}

impl ToothPosition {
    /// Manual placement, clamped inside the image
    pub fn manual(id: impl Into<String>, number: ToothNumber, bounds: PercentBox) -> Self {
        let width = clamp_extent(bounds.width);
        let height = clamp_extent(bounds.height);
        let (x, y) = clamp_origin(bounds.x, bounds.y, width, height);
        Self {
            id: id.into(),
            number,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            source: PositionSource::Manual,
        }
    }

    /// Position for a detector result
    pub fn from_detected(region: &DetectedRegion) -> Self {
        let b = region.bounding_box;
        Self {
            id: format!("detected-{}", region.id),
            number: region.assigned_tooth_number,
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            rotation: 0.0,
            source: PositionSource::Detected,
        }
    }

    /// Position converted from the static chart; `None` only if the chart lacks the tooth
    pub fn from_chart(number: ToothNumber) -> Option<Self> {
        let b = chart::chart_box(number)?;
        Some(Self {
            id: format!("chart-{number}"),
            number,
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            rotation: 0.0,
            source: PositionSource::Chart,
        })
    }

    /// Extent as a percent box
    pub fn bounds(&self) -> PercentBox {
        PercentBox::new(self.x, self.y, self.width, self.height)
    }

    /// Center in percent
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Move the top-left corner, keeping the box inside the image
    pub fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = clamp_origin(x, y, self.width, self.height);
        self.x = x;
        self.y = y;
    }

    /// Set rotation, normalized into `[0, 360)`
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_rotation(degrees);
    }
}

/// Clamp a top-left corner to `[0, 100-width]` x `[0, 100-height]`
pub fn clamp_origin(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let max_x = (100.0 - width).max(0.0);
    let max_y = (100.0 - height).max(0.0);
    (finite_or_zero(x).clamp(0.0, max_x), finite_or_zero(y).clamp(0.0, max_y))
}

/// Clamp a width or height into `[0, 100]`; non-finite values become 0
pub fn clamp_extent(v: f32) -> f32 {
    finite_or_zero(v).clamp(0.0, 100.0)
}

/// Wrap degrees into `[0, 360)`
pub fn normalize_rotation(degrees: f32) -> f32 {
    let r = finite_or_zero(degrees).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if r >= 360.0 { 0.0 } else { r }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooth(n: u8) -> ToothNumber {
        ToothNumber::new(n).unwrap()
    }

    #[test]
    fn test_clamp_origin() {
        assert_eq!(clamp_origin(-5.0, 120.0, 10.0, 20.0), (0.0, 80.0));
        assert_eq!(clamp_origin(95.0, 50.0, 10.0, 20.0), (90.0, 50.0));
        assert_eq!(clamp_origin(f32::NAN, 3.0, 10.0, 10.0), (0.0, 3.0));
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(370.0), 10.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
    }

    #[test]
    fn test_manual_is_clamped() {
        let p = ToothPosition::manual("m1", tooth(11), PercentBox::new(98.0, -3.0, 5.0, 8.0));
        assert_eq!((p.x, p.y), (95.0, 0.0));
        assert_eq!(p.source, PositionSource::Manual);
    }

    #[test]
    fn test_from_chart() {
        let p = ToothPosition::from_chart(tooth(11)).unwrap();
        assert_eq!(p.source, PositionSource::Chart);
        assert!(p.x >= 0.0 && p.x + p.width <= 100.0);
        assert!(p.y >= 0.0 && p.y + p.height <= 100.0);
        // Tooth 11 sits on the patient's right of the upper arch: image upper-left.
        let c = p.center();
        assert!(c.x < 50.0 && c.y < 50.0);
    }

    #[test]
    fn test_json_field_names() {
        let p = ToothPosition::manual("m1", tooth(21), PercentBox::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["number"], 21);
        assert_eq!(json["source"], "manual");
        assert_eq!(json["rotation"], 0.0);
    }
}
