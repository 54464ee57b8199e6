use crate::models::{CanvasSize, Dentition, Quadrant};

/// Fixed canvas the absolute chart centers are drawn against
pub const CHART_CANVAS: CanvasSize = CanvasSize::new(1000.0, 600.0);

/// Drawn tooth footprint on the chart canvas, in pixels (width, height)
pub(crate) const PERMANENT_TOOTH_SIZE: (f32, f32) = (48.0, 72.0);
pub(crate) const TEMPORARY_TOOTH_SIZE: (f32, f32) = (40.0, 56.0);

// Leading FDI digit -> quadrant and dentition. Index 0 is unused.
pub(crate) const QUADRANT_DIGITS: [Option<(Quadrant, Dentition)>; 9] = [
    None,
    Some((Quadrant::UpperRight, Dentition::Permanent)),
    Some((Quadrant::UpperLeft, Dentition::Permanent)),
    Some((Quadrant::LowerLeft, Dentition::Permanent)),
    Some((Quadrant::LowerRight, Dentition::Permanent)),
    Some((Quadrant::UpperRight, Dentition::Temporary)),
    Some((Quadrant::UpperLeft, Dentition::Temporary)),
    Some((Quadrant::LowerLeft, Dentition::Temporary)),
    Some((Quadrant::LowerRight, Dentition::Temporary)),
];

// Tooth centers on CHART_CANVAS: (number, x, y).
// The patient's right is drawn on the image left.
pub(crate) const PERMANENT_CENTERS: [(u8, f32, f32); 32] = [
    (11, 473.0, 120.0),
    (12, 419.0, 123.0),
    (13, 365.0, 129.0),
    (14, 311.0, 137.0),
    (15, 257.0, 148.0),
    (16, 203.0, 163.0),
    (17, 149.0, 179.0),
    (18, 95.0, 199.0),
    (21, 527.0, 120.0),
    (22, 581.0, 123.0),
    (23, 635.0, 129.0),
    (24, 689.0, 137.0),
    (25, 743.0, 148.0),
    (26, 797.0, 163.0),
    (27, 851.0, 179.0),
    (28, 905.0, 199.0),
    (31, 527.0, 480.0),
    (32, 581.0, 477.0),
    (33, 635.0, 471.0),
    (34, 689.0, 463.0),
    (35, 743.0, 452.0),
    (36, 797.0, 437.0),
    (37, 851.0, 421.0),
    (38, 905.0, 401.0),
    (41, 473.0, 480.0),
    (42, 419.0, 477.0),
    (43, 365.0, 471.0),
    (44, 311.0, 463.0),
    (45, 257.0, 452.0),
    (46, 203.0, 437.0),
    (47, 149.0, 421.0),
    (48, 95.0, 401.0),
];

pub(crate) const TEMPORARY_CENTERS: [(u8, f32, f32); 20] = [
    (51, 477.0, 240.0),
    (52, 431.0, 244.0),
    (53, 385.0, 250.0),
    (54, 339.0, 260.0),
    (55, 293.0, 272.0),
    (61, 523.0, 240.0),
    (62, 569.0, 244.0),
    (63, 615.0, 250.0),
    (64, 661.0, 260.0),
    (65, 707.0, 272.0),
    (71, 523.0, 360.0),
    (72, 569.0, 356.0),
    (73, 615.0, 350.0),
    (74, 661.0, 340.0),
    (75, 707.0, 328.0),
    (81, 477.0, 360.0),
    (82, 431.0, 356.0),
    (83, 385.0, 350.0),
    (84, 339.0, 340.0),
    (85, 293.0, 328.0),
];
