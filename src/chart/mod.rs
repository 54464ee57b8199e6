//! Static odontogram chart
//!
//! Two immutable lookups, built once on first use:
//! - FDI number -> quadrant and dentition (the numbering authority)
//! - FDI number -> tooth center on the fixed chart canvas, in absolute pixels

mod tables;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{Coordinate, Dentition, PercentBox, Point, Quadrant, ToothNumber};

pub use tables::CHART_CANVAS;

/// Table entry for one tooth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothInfo {
    /// Raw FDI number
    pub number: u8,
    /// Quadrant from the leading digit table
    pub quadrant: Quadrant,
    /// Dentition from the leading digit table
    pub dentition: Dentition,
    /// Center on [`CHART_CANVAS`], absolute pixels
    pub chart_center: Point,
}

static INDEX: OnceLock<BTreeMap<u8, ToothInfo>> = OnceLock::new();

fn index() -> &'static BTreeMap<u8, ToothInfo> {
    INDEX.get_or_init(|| {
        tables::PERMANENT_CENTERS
            .iter()
            .chain(tables::TEMPORARY_CENTERS.iter())
            .filter_map(|&(number, x, y)| {
                let (quadrant, dentition) = tables::QUADRANT_DIGITS
                    .get(usize::from(number / 10))
                    .copied()
                    .flatten()?;
                Some((
                    number,
                    ToothInfo {
                        number,
                        quadrant,
                        dentition,
                        chart_center: Point::new(x, y),
                    },
                ))
            })
            .collect()
    })
}

/// Look up a raw FDI number
pub fn tooth_info(number: u8) -> Option<ToothInfo> {
    index().get(&number).copied()
}

/// Quadrant of a tooth according to the table
pub fn quadrant_of(number: ToothNumber) -> Option<Quadrant> {
    tooth_info(number.value()).map(|info| info.quadrant)
}

/// Chart center of a tooth, tagged as absolute pixels on [`CHART_CANVAS`]
pub fn chart_center(number: ToothNumber) -> Option<Coordinate> {
    tooth_info(number.value()).map(|info| Coordinate::AbsolutePixels(info.chart_center))
}

/// Drawn footprint of a tooth converted to percent of [`CHART_CANVAS`]
pub fn chart_box(number: ToothNumber) -> Option<PercentBox> {
    let info = tooth_info(number.value())?;
    let (w, h) = match info.dentition {
        Dentition::Permanent => tables::PERMANENT_TOOTH_SIZE,
        Dentition::Temporary => tables::TEMPORARY_TOOTH_SIZE,
    };
    let top_left = Coordinate::AbsolutePixels(info.chart_center.translate(-w / 2.0, -h / 2.0))
        .to_percent(CHART_CANVAS);
    let size = Coordinate::AbsolutePixels(Point::new(w, h)).to_percent(CHART_CANVAS);
    Some(PercentBox::new(top_left.x, top_left.y, size.x, size.y))
}

/// All teeth of one dentition, ascending by number
pub fn teeth(dentition: Dentition) -> impl Iterator<Item = ToothNumber> {
    index()
        .values()
        .filter(move |info| info.dentition == dentition)
        .filter_map(|info| ToothNumber::new(info.number).ok())
}
