//! Crate error type

use std::path::PathBuf;

/// Errors raised by detection, layout editing and export
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Image has a zero dimension, typically because it was never loaded
    #[error("image has zero size ({width}x{height})")]
    EmptyImage {
        /// Reported width
        width: usize,
        /// Reported height
        height: usize,
    },

    /// Pixel buffer does not cover `width * height * channels` bytes
    #[error(
        "pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} with {channels} channel(s)"
    )]
    BufferSizeMismatch {
        /// Image width
        width: usize,
        /// Image height
        height: usize,
        /// Bytes per pixel
        channels: usize,
        /// Required byte count
        expected: usize,
        /// Provided byte count
        actual: usize,
    },

    /// Detection parameters that cannot describe any run
    #[error("invalid detection parameters: {0}")]
    InvalidParams(String),

    /// Number outside the FDI permanent (11-48) and temporary (51-85) sets
    #[error("{0} is not a valid FDI tooth number")]
    InvalidToothNumber(u8),

    /// No tooth position with the given id in the layout
    #[error("no tooth position with id {0:?}")]
    UnknownPosition(String),

    /// Image file could not be opened or decoded
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        /// Path that was opened
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// Layout or params JSON could not be (de)serialized
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure during export/import
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
