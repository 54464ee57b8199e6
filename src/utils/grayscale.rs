//! Convert interleaved RGB/RGBA pixels to luma
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Rows are converted in parallel with rayon once the image is large enough
//! to amortize the thread handoff; output is identical either way.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Pixel count above which rows are processed in parallel
const PARALLEL_MIN_PIXELS: usize = 256 * 256;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Check that `pixels` covers exactly `width * height * channels` bytes
pub fn check_buffer(pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    let expected = width * height * channels;
    if pixels.len() != expected {
        return Err(Error::BufferSizeMismatch {
            width,
            height,
            channels,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Convert interleaved pixels with 3 (RGB) or 4 (RGBA) channels to grayscale.
/// Alpha is ignored. A single channel is copied through.
pub fn to_grayscale(pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<Vec<u8>> {
    check_buffer(pixels, width, height, channels)?;
    if channels == 1 {
        return Ok(pixels.to_vec());
    }
    if channels < 3 {
        return Err(Error::InvalidParams(format!(
            "unsupported channel count {channels}"
        )));
    }

    let mut gray = vec![0u8; width * height];
    let convert_row = |(y, row): (usize, &mut [u8])| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = luma(pixels[idx], pixels[idx + 1], pixels[idx + 2]);
        }
    };

    if width * height >= PARALLEL_MIN_PIXELS {
        gray.par_chunks_mut(width).enumerate().for_each(convert_row);
    } else {
        gray.chunks_mut(width).enumerate().for_each(convert_row);
    }
    Ok(gray)
}

/// Convert RGB image to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    to_grayscale(rgb, width, height, 3)
}

/// Convert RGBA image to grayscale (ignores alpha channel)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    to_grayscale(rgba, width, height, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let gray = rgb_to_grayscale(&[255, 255, 255], 1, 1).unwrap();
        assert!(gray[0] >= 254);

        // Pure black
        let gray = rgb_to_grayscale(&[0, 0, 0], 1, 1).unwrap();
        assert_eq!(gray[0], 0);

        // Pure red
        let gray = rgb_to_grayscale(&[255, 0, 0], 1, 1).unwrap();
        assert!(gray[0] > 0 && gray[0] < 255);

        // Pure green
        let gray = rgb_to_grayscale(&[0, 255, 0], 1, 1).unwrap();
        assert!(gray[0] > 100);

        // 2x2 image
        let img = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = rgb_to_grayscale(&img, 2, 2).unwrap();
        assert_eq!(gray.len(), 4);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let opaque = rgba_to_grayscale(&[255, 128, 64, 255], 1, 1).unwrap();
        let clear = rgba_to_grayscale(&[255, 128, 64, 0], 1, 1).unwrap();
        assert_eq!(opaque, clear);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (w, h) = (300, 300);
        let rgb: Vec<u8> = (0..w * h * 3).map(|i| (i * 31 % 251) as u8).collect();
        let gray = rgb_to_grayscale(&rgb, w, h).unwrap();
        for (i, &g) in gray.iter().enumerate() {
            assert_eq!(g, luma(rgb[i * 3], rgb[i * 3 + 1], rgb[i * 3 + 2]));
        }
    }

    #[test]
    fn test_buffer_validation() {
        assert!(matches!(
            rgb_to_grayscale(&[0; 5], 1, 2),
            Err(Error::BufferSizeMismatch { expected: 6, actual: 5, .. })
        ));
        assert!(matches!(
            rgb_to_grayscale(&[], 0, 4),
            Err(Error::EmptyImage { .. })
        ));
    }
}
