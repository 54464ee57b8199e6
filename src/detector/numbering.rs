//! Position-based FDI numbering.
//!
//! The image is split at its midpoints: the left half is the patient's right,
//! the top half is the upper arch. Inside a quadrant, teeth are counted
//! outward from the vertical midline in equal slots, one slot per tooth of
//! the chosen dentition.
//!
//! This is a 2D layout guess, not tooth identity. Clusters near the midline
//! may flip quadrant between runs and irregular spacing can give two regions
//! the same number; callers see such collisions through
//! [`duplicate_numbers`].

use std::collections::BTreeMap;

use crate::models::{DetectedRegion, Dentition, Point, Quadrant, ToothNumber};

/// Image midline, in percent
const MIDLINE: f32 = 50.0;

/// Quadrant for a region center given in percent of the image
pub fn quadrant_for(center: Point) -> Quadrant {
    let image_left = center.x < MIDLINE;
    let upper = center.y < MIDLINE;
    match (upper, image_left) {
        (true, true) => Quadrant::UpperRight,
        (true, false) => Quadrant::UpperLeft,
        (false, false) => Quadrant::LowerLeft,
        (false, true) => Quadrant::LowerRight,
    }
}

/// Horizontal distance of a center from the vertical midline, in percent
pub fn distance_from_midline(center: Point) -> f32 {
    (center.x - MIDLINE).abs()
}

/// Map a quadrant and a midline distance (0-50 percent) to a tooth number.
///
/// Distances past the last slot clamp to the outermost tooth, negative or
/// non-finite distances to the central incisor.
pub fn assign_tooth_number(
    quadrant: Quadrant,
    dentition: Dentition,
    distance_from_midline: f32,
) -> ToothNumber {
    let teeth = dentition.teeth_per_quadrant();
    let slot = MIDLINE / f32::from(teeth);
    let distance = if distance_from_midline.is_finite() {
        distance_from_midline.max(0.0)
    } else {
        0.0
    };
    let index = (distance / slot).floor().min(f32::from(teeth - 1)) as u8 + 1;

    // index is within 1..=teeth, so the number is always in the chart
    ToothNumber::new_unchecked(quadrant.fdi_digit(dentition) * 10 + index)
}

/// Number for a region center in percent of the image
pub fn number_for_center(center: Point, dentition: Dentition) -> ToothNumber {
    assign_tooth_number(quadrant_for(center), dentition, distance_from_midline(center))
}

/// Tooth numbers assigned to more than one region, ascending
pub fn duplicate_numbers(regions: &[DetectedRegion]) -> Vec<ToothNumber> {
    let mut counts: BTreeMap<ToothNumber, usize> = BTreeMap::new();
    for region in regions {
        *counts.entry(region.assigned_tooth_number).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(number, _)| number)
        .collect()
}
