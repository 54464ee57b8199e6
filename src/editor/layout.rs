use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart;
use crate::error::{Error, Result};
use crate::models::position::{clamp_extent, clamp_origin, normalize_rotation};
use crate::models::{DetectedRegion, Dentition, PercentBox, Point, ToothNumber, ToothPosition};

/// Numeric edit of one position; `None` leaves a field unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionEdit {
    /// New tooth number
    pub number: Option<ToothNumber>,
    /// New left edge
    pub x: Option<f32>,
    /// New top edge
    pub y: Option<f32>,
    /// New width
    pub width: Option<f32>,
    /// New height
    pub height: Option<f32>,
    /// New rotation in degrees
    pub rotation: Option<f32>,
}

/// In-memory tooth list edited over one reference image.
///
/// Nothing here persists on its own; [`ToothLayout::to_json`] and
/// [`ToothLayout::export_to_file`] are the only ways out.
///
/// Ids and tooth numbers are unique; loading a list that repeats either keeps
/// the later entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ToothPosition>", into = "Vec<ToothPosition>")]
pub struct ToothLayout {
    positions: Vec<ToothPosition>,
}

impl From<Vec<ToothPosition>> for ToothLayout {
    fn from(positions: Vec<ToothPosition>) -> Self {
        Self::from_positions(positions)
    }
}

impl From<ToothLayout> for Vec<ToothPosition> {
    fn from(layout: ToothLayout) -> Self {
        layout.positions
    }
}

impl ToothLayout {
    /// Empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout seeded from the static chart for one dentition
    pub fn from_chart(dentition: Dentition) -> Self {
        let positions = chart::teeth(dentition)
            .filter_map(ToothPosition::from_chart)
            .collect();
        Self { positions }
    }

    /// Build from existing positions; a repeated id or tooth number keeps the later entry
    pub fn from_positions(positions: Vec<ToothPosition>) -> Self {
        let total = positions.len();
        let mut layout = Self::new();
        for position in positions {
            layout
                .positions
                .retain(|p| p.id != position.id && p.number != position.number);
            layout.positions.push(position);
        }
        if layout.len() < total {
            log::warn!(
                "dropped {} positions with a repeated id or tooth number",
                total - layout.len()
            );
        }
        layout
    }

    /// Positions in draw order
    pub fn positions(&self) -> &[ToothPosition] {
        &self.positions
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no positions are present
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position by id
    pub fn get(&self, id: &str) -> Option<&ToothPosition> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut ToothPosition> {
        self.positions.iter_mut().find(|p| p.id == id)
    }

    /// Position by tooth number
    pub fn find_by_number(&self, number: ToothNumber) -> Option<&ToothPosition> {
        self.positions.iter().find(|p| p.number == number)
    }

    /// Insert a position, replacing any existing position with the same tooth number
    pub fn upsert(&mut self, position: ToothPosition) {
        match self.positions.iter_mut().find(|p| p.number == position.number) {
            Some(existing) => *existing = position,
            None => self.positions.push(position),
        }
    }

    /// Merge detector output into the list.
    ///
    /// Regions sharing a number overwrite each other in order, so the last
    /// one wins. Returns the number of regions applied.
    pub fn apply_detected(&mut self, regions: &[DetectedRegion]) -> usize {
        for region in regions {
            self.upsert(ToothPosition::from_detected(region));
        }
        log::info!("applied {} detected regions, layout has {}", regions.len(), self.len());
        regions.len()
    }

    /// Place a tooth by hand; the id is generated and returned
    pub fn place_manual(&mut self, number: ToothNumber, bounds: PercentBox) -> String {
        let mut seq = self.positions.len() + 1;
        let id = loop {
            let candidate = format!("manual-{seq}");
            if self.get(&candidate).is_none() {
                break candidate;
            }
            seq += 1;
        };
        self.upsert(ToothPosition::manual(id.clone(), number, bounds));
        id
    }

    /// Apply a numeric edit, keeping the box inside the image
    pub fn edit(&mut self, id: &str, edit: PositionEdit) -> Result<&ToothPosition> {
        let position = self
            .get_mut(id)
            .ok_or_else(|| Error::UnknownPosition(id.to_string()))?;

        if let Some(number) = edit.number {
            position.number = number;
        }
        if let Some(w) = edit.width {
            position.width = clamp_extent(w);
        }
        if let Some(h) = edit.height {
            position.height = clamp_extent(h);
        }
        let (x, y) = clamp_origin(
            edit.x.unwrap_or(position.x),
            edit.y.unwrap_or(position.y),
            position.width,
            position.height,
        );
        position.x = x;
        position.y = y;
        if let Some(r) = edit.rotation {
            position.rotation = normalize_rotation(r);
        }

        // Renumbering onto an existing tooth: the edited entry wins.
        if edit.number.is_some() {
            let (id, number) = (position.id.clone(), position.number);
            self.positions.retain(|p| p.id == id || p.number != number);
        }

        self.get(id).ok_or_else(|| Error::UnknownPosition(id.to_string()))
    }

    /// Remove a position by id
    pub fn remove(&mut self, id: &str) -> Result<ToothPosition> {
        let index = self
            .positions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPosition(id.to_string()))?;
        Ok(self.positions.remove(index))
    }

    /// Id of the topmost position under `point` (percent), if any
    pub fn hit_test(&self, point: Point) -> Option<&str> {
        self.positions
            .iter()
            .rev()
            .find(|p| p.bounds().contains(point))
            .map(|p| p.id.as_str())
    }

    /// Pretty JSON dump of the positions
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON dump produced by [`ToothLayout::to_json`]
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the JSON dump to `path`
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("exported {} tooth positions to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    /// Read a JSON dump from `path`
    pub fn import_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PositionSource;

    fn tooth(n: u8) -> ToothNumber {
        ToothNumber::new(n).unwrap()
    }

    fn region(id: usize, number: u8, x: f32) -> DetectedRegion {
        DetectedRegion {
            id,
            bounding_box: PercentBox::new(x, 10.0, 5.0, 8.0),
            pixel_area: 150,
            confidence: 0.8,
            assigned_tooth_number: tooth(number),
        }
    }

    #[test]
    fn test_from_chart() {
        assert_eq!(ToothLayout::from_chart(Dentition::Permanent).len(), 32);
        let layout = ToothLayout::from_chart(Dentition::Temporary);
        assert_eq!(layout.len(), 20);
        assert!(layout.positions().iter().all(|p| p.source == PositionSource::Chart));
    }

    #[test]
    fn test_apply_detected_last_write_wins() {
        let mut layout = ToothLayout::new();
        layout.apply_detected(&[region(0, 51, 10.0), region(1, 52, 20.0), region(2, 51, 30.0)]);
        assert_eq!(layout.len(), 2);
        let p = layout.find_by_number(tooth(51)).unwrap();
        assert_eq!(p.x, 30.0);
        assert_eq!(p.id, "detected-2");
    }

    #[test]
    fn test_apply_detected_replaces_chart_entry() {
        let mut layout = ToothLayout::from_chart(Dentition::Temporary);
        layout.apply_detected(&[region(0, 61, 70.0)]);
        assert_eq!(layout.len(), 20);
        assert_eq!(
            layout.find_by_number(tooth(61)).unwrap().source,
            PositionSource::Detected
        );
    }

    #[test]
    fn test_place_manual_generates_unique_ids() {
        let mut layout = ToothLayout::new();
        let a = layout.place_manual(tooth(11), PercentBox::new(0.0, 0.0, 5.0, 5.0));
        let b = layout.place_manual(tooth(12), PercentBox::new(10.0, 0.0, 5.0, 5.0));
        assert_ne!(a, b);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_edit_clamps_and_normalizes() {
        let mut layout = ToothLayout::new();
        let id = layout.place_manual(tooth(11), PercentBox::new(10.0, 10.0, 10.0, 10.0));
        let p = layout
            .edit(
                &id,
                PositionEdit {
                    x: Some(150.0),
                    y: Some(-4.0),
                    rotation: Some(-30.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!((p.x, p.y), (90.0, 0.0));
        assert_eq!(p.rotation, 330.0);
    }

    #[test]
    fn test_edit_renumber_displaces_existing() {
        let mut layout = ToothLayout::new();
        let a = layout.place_manual(tooth(11), PercentBox::new(0.0, 0.0, 5.0, 5.0));
        layout.place_manual(tooth(12), PercentBox::new(10.0, 0.0, 5.0, 5.0));
        layout
            .edit(&a, PositionEdit { number: Some(tooth(12)), ..Default::default() })
            .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.find_by_number(tooth(12)).unwrap().id, a);
    }

    #[test]
    fn test_unknown_id() {
        let mut layout = ToothLayout::new();
        assert!(matches!(layout.remove("nope"), Err(Error::UnknownPosition(_))));
        assert!(layout.edit("nope", PositionEdit::default()).is_err());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut layout = ToothLayout::new();
        let a = layout.place_manual(tooth(11), PercentBox::new(0.0, 0.0, 20.0, 20.0));
        let b = layout.place_manual(tooth(12), PercentBox::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(layout.hit_test(Point::new(15.0, 15.0)), Some(b.as_str()));
        assert_eq!(layout.hit_test(Point::new(5.0, 5.0)), Some(a.as_str()));
        assert_eq!(layout.hit_test(Point::new(90.0, 90.0)), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut layout = ToothLayout::from_chart(Dentition::Permanent);
        layout.apply_detected(&[region(0, 11, 40.0)]);
        let json = layout.to_json().unwrap();
        assert_eq!(ToothLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_edit_non_finite_size_stays_exportable() {
        let mut layout = ToothLayout::new();
        let id = layout.place_manual(tooth(21), PercentBox::new(30.0, 30.0, 10.0, 10.0));
        let p = layout
            .edit(
                &id,
                PositionEdit {
                    width: Some(f32::NAN),
                    height: Some(f32::INFINITY),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!((p.width, p.height), (0.0, 0.0));
        let json = layout.to_json().unwrap();
        assert!(!json.contains("null"));
        assert_eq!(ToothLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_place_manual_non_finite_size() {
        let mut layout = ToothLayout::new();
        let id = layout.place_manual(tooth(22), PercentBox::new(10.0, 10.0, f32::NAN, 5.0));
        let p = layout.get(&id).unwrap();
        assert_eq!((p.width, p.height), (0.0, 5.0));
    }

    #[test]
    fn test_from_json_keeps_last_duplicate() {
        let json = r#"[
            {"id":"a","number":11,"x":0,"y":0,"width":5,"height":5},
            {"id":"b","number":11,"x":20,"y":0,"width":5,"height":5},
            {"id":"b","number":12,"x":40,"y":0,"width":5,"height":5},
            {"id":"c","number":13,"x":60,"y":0,"width":5,"height":5}
        ]"#;
        let layout = ToothLayout::from_json(json).unwrap();
        assert_eq!(layout.len(), 2);
        assert!(layout.find_by_number(tooth(11)).is_none());
        assert_eq!(layout.get("b").unwrap().number, tooth(12));
        assert_eq!(layout.find_by_number(tooth(13)).unwrap().id, "c");
    }

    #[test]
    fn test_from_positions_dedupes_by_number() {
        let layout = ToothLayout::from_positions(vec![
            ToothPosition::manual("x", tooth(11), PercentBox::new(0.0, 0.0, 5.0, 5.0)),
            ToothPosition::manual("y", tooth(11), PercentBox::new(50.0, 0.0, 5.0, 5.0)),
        ]);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.find_by_number(tooth(11)).unwrap().id, "y");
    }

    #[test]
    fn test_json_rejects_invalid_number() {
        let json = r#"[{"id":"x","number":19,"x":0,"y":0,"width":1,"height":1}]"#;
        assert!(matches!(ToothLayout::from_json(json), Err(Error::Json(_))));
    }
}
