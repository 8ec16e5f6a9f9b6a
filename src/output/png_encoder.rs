//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::surface::Surface;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for surface snapshots.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a surface to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(surface: &Surface, path: P) -> Result<()> {
        let path = path.as_ref();
        log::debug!("writing {}x{} PNG to {}", surface.width(), surface.height(), path.display());
        let file = File::create(path)?;
        Self::encode(surface, BufWriter::new(file))
    }

    /// Encode a surface to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(surface: &Surface) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(surface, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(surface: &Surface, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&surface.to_rgba_bytes())?;
        writer.finish()?;
        Ok(())
    }
}
