//! Output encoders.

#[cfg(feature = "png")]
mod png_encoder;

#[cfg(feature = "png")]
pub use png_encoder::PngEncoder;
