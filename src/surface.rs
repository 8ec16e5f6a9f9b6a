//! Pixel surface: the owned RGBA buffer every primitive draws into.
//!
//! A [`Surface`] is a contiguous row-major array of [`Rgba`] pixels plus a
//! clip rectangle. Accessors come in two flavours:
//!
//! - `*_unclipped` accessors trust the caller to stay inside the surface and
//!   are the hot path used by primitives once clipping has been resolved.
//! - [`Surface::get`] and [`Surface::set`] check against the full surface,
//!   and [`Surface::plot`] additionally honours the clip rectangle.
//!
//! Span primitives (`hline`, `vline`) live in [`crate::render`] and are
//! implemented as further `impl Surface` blocks there.

use crate::color::Rgba;
use crate::contracts::clip_contracts;
use crate::error::{Error, Result};
use crate::geometry::ClipRect;
use trueno::Vector;

/// Owned RGBA pixel buffer with a clip rectangle.
///
/// Rows are stored back to back without padding, so the pixel at `(x, y)`
/// lives at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Pixels in row-major order.
    pixels: Vec<Rgba>,
    /// Region outside of which primitives never write.
    clip: ClipRect,
}

impl Surface {
    /// Create a new surface with the given dimensions.
    ///
    /// Every pixel starts as [`Rgba::TRANSPARENT`] and the clip rectangle
    /// covers the whole surface.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero, or if the pixel count
    /// does not fit in memory addressing.
    ///
    /// # Example
    ///
    /// ```
    /// use pixrast::surface::Surface;
    ///
    /// let surface = Surface::new(800, 600).unwrap();
    /// assert_eq!(surface.width(), 800);
    /// assert_eq!(surface.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let count = Self::checked_pixel_count(width, height)?;
        log::debug!("creating {width}x{height} surface");

        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; count],
            clip: ClipRect::full(width, height),
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `pixels.len()` differs from
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = Self::checked_pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            clip: ClipRect::full(width, height),
        })
    }

    fn checked_pixel_count(width: u32, height: u32) -> Result<usize> {
        // Coordinates are carried as i32 by the primitives
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimensions { width, height })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The current clip rectangle.
    #[must_use]
    pub const fn clip_rect(&self) -> ClipRect {
        self.clip
    }

    /// Restrict drawing to the rectangle `(x, y, w, h)`.
    ///
    /// The rectangle is clamped to the surface bounds before it is stored.
    pub fn set_clip_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.clip = ClipRect::clamped(x, y, w, h, self.width, self.height);
        debug_assert!(clip_contracts::clip_within_bounds(
            &self.clip,
            self.width,
            self.height
        ));
    }

    /// Reset the clip rectangle to the full surface.
    pub fn clear_clip_rect(&mut self) {
        self.clip = ClipRect::full(self.width, self.height);
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Get the raw pixel data as a mutable slice.
    ///
    /// Writes through this slice bypass the clip rectangle.
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[Rgba]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// Get a row of pixels as a mutable slice.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [Rgba]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        let end = start + self.width as usize;
        Some(&mut self.pixels[start..end])
    }

    /// Whether `(x, y)` lies on the surface.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Calculate the index for a pixel coordinate.
    #[inline]
    pub(crate) fn pixel_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y), "pixel ({x}, {y}) outside surface");
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Mutable run of `len` pixels starting at `(x, y)`.
    #[inline]
    pub(crate) fn span_mut(&mut self, x: i32, y: i32, len: usize) -> &mut [Rgba] {
        let start = self.pixel_index(x, y);
        &mut self.pixels[start..start + len]
    }

    /// Read a pixel the caller knows to be on the surface.
    #[inline]
    #[must_use]
    pub fn get_unclipped(&self, x: i32, y: i32) -> Rgba {
        self.pixels[self.pixel_index(x, y)]
    }

    /// Write a pixel the caller knows to be on the surface.
    ///
    /// Opaque colors overwrite; anything else is composited with
    /// [`Rgba::composite_over`].
    #[inline]
    pub fn set_unclipped(&mut self, x: i32, y: i32, color: Rgba) {
        let idx = self.pixel_index(x, y);
        let pixel = &mut self.pixels[idx];
        *pixel = color.composite_over(*pixel);
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are off the surface. The clip
    /// rectangle is not consulted.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.in_bounds(x, y).then(|| self.get_unclipped(x, y))
    }

    /// Composite a color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are off the surface. The clip
    /// rectangle is not consulted; see [`Surface::plot`].
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            self.set_unclipped(x, y, color);
        }
    }

    /// Composite a color at `(x, y)` if it lies inside the clip rectangle.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: Rgba) {
        if self.clip.contains(x, y) {
            self.set_unclipped(x, y, color);
        }
    }

    /// Fill the clip rectangle with a color.
    pub fn clear(&mut self, color: Rgba) {
        crate::render::rect_fill(self, 0, 0, self.width as i32, self.height as i32, color);
    }

    /// Get statistics about the surface using SIMD-accelerated reduction.
    ///
    /// Returns (min_luminance, max_luminance, avg_luminance) using the
    /// weights of [`Rgba::luminance`].
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luminances: Vec<f32> = self.pixels.iter().map(|p| p.luminance()).collect();

        // Use trueno for SIMD-accelerated min/max/mean
        let vec = Vector::from_vec(luminances);

        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(255.0);
        let mean = vec.mean().unwrap_or(127.5);

        (min, max, mean)
    }

    /// Get pixel data as tightly packed `[R, G, B, A]` bytes.
    ///
    /// This is the layout expected by image encoders such as PNG.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }
}
