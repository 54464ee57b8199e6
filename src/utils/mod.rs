//! Image preprocessing helpers
//!
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Brightness thresholding into a bit mask, plus an Otsu suggestion

/// Brightness threshold and Otsu estimate
pub mod binarization;
/// Luma conversion
pub mod grayscale;
