//! Error types for pixrast operations.
//!
//! Drawing primitives never fail: out-of-range geometry is clipped and
//! degenerate input is a no-op. Only surface construction and image output
//! can return an error.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pixrast operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match `width * height`.
    #[error("Pixel count mismatch: expected {expected} pixels, got {actual}")]
    PixelCountMismatch {
        /// Number of pixels required by the dimensions.
        expected: usize,
        /// Number of pixels supplied.
        actual: usize,
    },
}
