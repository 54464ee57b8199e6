//! Tooth region detection modules
//!
//! - Flood fill clustering over the bright-pixel mask, with the area band
//!   that rejects specks and over-merged background
//! - Position-based FDI numbering of accepted regions

/// BFS flood fill, connectivity and area filtering
pub mod flood_fill;
/// Quadrant split and midline-distance numbering
pub mod numbering;
