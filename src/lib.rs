//! Odontogram - tooth region detection and FDI numbering
//!
//! Finds roughly tooth-shaped bright regions in a reference image of a dental
//! arch with a flood fill over thresholded pixels, and gives each region a
//! two-digit FDI number from its position. Results feed a [`ToothLayout`]
//! that an operator adjusts by hand and exports as JSON.
//!
//! ```
//! use odontogram::{DetectionParams, detect_from_grayscale};
//!
//! let mut gray = vec![0u8; 100 * 100];
//! for y in 10..30 {
//!     for x in 30..40 {
//!         gray[y * 100 + x] = 255;
//!     }
//! }
//! let regions = detect_from_grayscale(&gray, 100, 100, &DetectionParams::default()).unwrap();
//! assert_eq!(regions.len(), 1);
//! assert_eq!(regions[0].pixel_area, 200);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Static FDI and chart-layout tables
pub mod chart;
/// Detection parameters, defaults and environment overrides
pub mod config;
/// Flood fill clustering and numbering
pub mod detector;
/// Tooth layout editing and interaction state machine
pub mod editor;
/// Crate error type
pub mod error;
/// Core data structures (BitMatrix, regions, tooth numbers, coordinates)
pub mod models;
mod pipeline;
/// Image loading and statistics helpers
pub mod tools;
/// Grayscale conversion and thresholding
pub mod utils;

pub use config::DetectionParams;
pub use detector::flood_fill::Connectivity;
pub use editor::{InteractionController, ToothLayout};
pub use error::{Error, Result};
pub use models::{
    Coordinate, DetectedRegion, Dentition, PercentBox, Quadrant, ToothNumber, ToothPosition,
};
pub use pipeline::DetectionReport;

use image::DynamicImage;
use utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};

/// Detect tooth regions in a grayscale image
///
/// # Arguments
/// * `gray` - Luma bytes (1 byte per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `params` - Threshold, area band, connectivity and numbering set
///
/// # Returns
/// Regions in raster order of their first pixel, or an error when the image
/// is empty, the buffer is the wrong size, or the params are inconsistent
pub fn detect_from_grayscale(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> Result<Vec<DetectedRegion>> {
    pipeline::detect_regions(gray, width, height, params).map(|(regions, _)| regions)
}

/// Like [`detect_from_grayscale`] but also returns stage counters
pub fn detect_with_report(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> Result<(Vec<DetectedRegion>, DetectionReport)> {
    pipeline::detect_regions(gray, width, height, params)
}

/// Detect tooth regions in an RGB image (3 bytes per pixel)
pub fn detect(
    rgb: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> Result<Vec<DetectedRegion>> {
    let gray = rgb_to_grayscale(rgb, width, height)?;
    detect_from_grayscale(&gray, width, height, params)
}

/// Detect tooth regions in an RGBA image (4 bytes per pixel, alpha ignored)
pub fn detect_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> Result<Vec<DetectedRegion>> {
    let gray = rgba_to_grayscale(rgba, width, height)?;
    detect_from_grayscale(&gray, width, height, params)
}

/// Detector bound to one parameter set
#[derive(Debug, Clone, Default)]
pub struct ToothDetector {
    params: DetectionParams,
}

impl ToothDetector {
    /// Detector with the given params
    pub fn new(params: DetectionParams) -> Self {
        Self { params }
    }

    /// Detector with defaults plus `ODONTO_*` environment overrides
    pub fn from_env() -> Self {
        Self::new(DetectionParams::from_env())
    }

    /// Current params
    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Mutable params, for slider-style adjustment between runs
    pub fn params_mut(&mut self) -> &mut DetectionParams {
        &mut self.params
    }

    /// Detect in a decoded image of any pixel format
    pub fn detect_image(&self, img: &DynamicImage) -> Result<Vec<DetectedRegion>> {
        let (gray, width, height) = tools::image_to_gray(img);
        detect_from_grayscale(&gray, width, height, &self.params)
    }

    /// Detect in a grayscale buffer, with stage counters
    pub fn detect_gray(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(Vec<DetectedRegion>, DetectionReport)> {
        detect_with_report(gray, width, height, &self.params)
    }

    /// Detect and merge the results into `layout`; returns the regions applied
    pub fn detect_into(&self, img: &DynamicImage, layout: &mut ToothLayout) -> Result<usize> {
        let regions = self.detect_image(img)?;
        Ok(layout.apply_detected(&regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbImage};

    #[test]
    fn test_detect_empty() {
        // All-dark 10x10 RGB image
        let image = vec![0u8; 300];
        let regions = detect(&image, 10, 10, &DetectionParams::default()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_detect_rgb_square() {
        let mut img = RgbImage::from_pixel(50, 50, image::Rgb([10, 10, 10]));
        for y in 5..17 {
            for x in 5..17 {
                img.put_pixel(x, y, image::Rgb([250, 250, 250]));
            }
        }
        let regions = detect(img.as_raw(), 50, 50, &DetectionParams::default()).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].pixel_area, 144);
    }

    #[test]
    fn test_zero_size_image_is_error() {
        let err = detect_from_grayscale(&[], 0, 0, &DetectionParams::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyImage { .. }));
    }

    #[test]
    fn test_detect_into_layout() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([0]));
        for y in 10..25 {
            for x in 60..70 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let detector = ToothDetector::default();
        let mut layout = ToothLayout::from_chart(Dentition::Temporary);
        let applied = detector
            .detect_into(&DynamicImage::ImageLuma8(img), &mut layout)
            .unwrap();
        assert_eq!(applied, 1);
        // center x=65 -> 15% from midline, upper image-right -> 62
        let p = layout.find_by_number(ToothNumber::new(62).unwrap()).unwrap();
        assert_eq!(p.source, models::PositionSource::Detected);
        assert_eq!(layout.len(), 20);
    }
}
