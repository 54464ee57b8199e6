//! Helpers shared by the CLI, benches and integration tests

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::config;
use crate::error::{Error, Result};
use crate::models::BitMatrix;
use crate::utils::binarization::{otsu_threshold, threshold_bright};

/// Downscale so the longest side is at most `max_dim`; smaller images pass through
pub fn limit_dimensions(img: DynamicImage, max_dim: Option<u32>) -> DynamicImage {
    let Some(max_dim) = max_dim else {
        return img;
    };
    let (w, h) = img.dimensions();
    if w.max(h) > max_dim {
        log::debug!("downscaling {}x{} to fit {}", w, h, max_dim);
        img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
    } else {
        img
    }
}

/// Flatten a decoded image to luma bytes with its dimensions
pub fn image_to_gray(img: &DynamicImage) -> (Vec<u8>, usize, usize) {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    (luma.into_raw(), width as usize, height as usize)
}

/// Load an image as grayscale, honoring `ODONTO_MAX_DIM`
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize)> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let img = limit_dimensions(img, config::max_dim());
    Ok(image_to_gray(&img))
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
    /// Otsu threshold, a starting point for the brightness cutoff
    pub suggested_threshold: u8,
}

/// Summary statistics for a bright-pixel mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStats {
    /// Count of bright pixels.
    pub bright_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of bright pixels to total pixels.
    pub bright_ratio: f64,
}

/// Compute min/max/avg and a threshold suggestion for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    GrayStats {
        min,
        max,
        avg,
        suggested_threshold: otsu_threshold(gray),
    }
}

/// Compute bright pixel stats for a mask.
pub fn mask_stats(mask: &BitMatrix) -> MaskStats {
    let bright = mask.count_set();
    let total = mask.len();
    let ratio = if total == 0 {
        0.0
    } else {
        bright as f64 / total as f64
    };
    MaskStats {
        bright_pixels: bright,
        total_pixels: total,
        bright_ratio: ratio,
    }
}

/// Threshold then summarize, as the operator's slider preview does
pub fn preview_threshold(gray: &[u8], width: usize, height: usize, threshold: u8) -> MaskStats {
    mask_stats(&threshold_bright(gray, width, height, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_grayscale_stats() {
        let stats = grayscale_stats(&[10, 20, 30, 40]);
        assert_eq!((stats.min, stats.max, stats.avg), (10, 40, 25));
    }

    #[test]
    fn test_preview_threshold() {
        let gray = vec![0, 255, 255, 0, 255, 0];
        let stats = preview_threshold(&gray, 3, 2, 128);
        assert_eq!(stats.bright_pixels, 3);
        assert_eq!(stats.total_pixels, 6);
        assert!((stats.bright_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_limit_dimensions() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(400, 200, Luma([9])));
        let small = limit_dimensions(img.clone(), Some(100));
        assert_eq!(small.dimensions(), (100, 50));
        assert_eq!(limit_dimensions(img.clone(), Some(1000)).dimensions(), (400, 200));
        assert_eq!(limit_dimensions(img, None).dimensions(), (400, 200));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_gray("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
