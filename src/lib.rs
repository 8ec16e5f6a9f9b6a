//! # pixrast
//!
//! Exact, clip-aware CPU rasterization into an owned RGBA surface.
//!
//! Every primitive writes only inside the surface's clip rectangle and
//! composites with integer alpha blending, so rendering is deterministic
//! down to the last pixel.
//!
//! ## Features
//!
//! - **Spans and lines**: clipped horizontal/vertical spans and run-length lines
//! - **Shapes**: rectangles, circles and ellipses, filled or outlined
//! - **Convex polygons**: exact solid fill plus 16 × 8 supersampled antialiasing
//! - **Bezier curves**: cubic curves flattened into line segments
//! - **Blits**: copy, masked copy, integer scaling and area-weighted resize
//! - **Output**: PNG snapshots (feature `png`)
//!
//! ## Quick Start
//!
//! ```rust
//! use pixrast::prelude::*;
//!
//! let mut surface = Surface::new(64, 64).unwrap();
//! surface.clear(Rgba::BLACK);
//! draw_line(&mut surface, 0, 0, 63, 63, Rgba::WHITE);
//! circle_fill(&mut surface, 32, 32, 10, Rgba::RED.with_alpha(128));
//!
//! let triangle = ConvexPolygon::new(vec![
//!     Point::new(4, 4),
//!     Point::new(4, 20),
//!     Point::new(20, 12),
//! ]);
//! fill_convex_polygon_aa(&mut surface, &triangle.to_subpixel(), Rgba::BLUE);
//!
//! assert_eq!(surface.get(63, 63), Some(Rgba::WHITE));
//! ```
//!
//! ## Feature Flags
//!
//! - `png` (default): PNG output via [`output::PngEncoder`]
//! - `serde`: Serialize/Deserialize for the value types
//!
//! ## References
//!
//! - Abrash, M. (1997). *Graphics Programming Black Book*. Coriolis.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in rasterization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA color type and pixel compositing.
pub mod color;

/// Owned pixel surface with a clip rectangle.
pub mod surface;

/// Geometric value types (points, lines, rectangles, polygons).
pub mod geometry;

/// Runtime checks for the invariants rasterizers rely on.
pub mod contracts;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization of primitives and blits.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for pixrast operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use pixrast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{ClipRect, ConvexPolygon, Line, Point, Rect, SUBPIXELS_PER_PIXEL};
    pub use crate::render::{
        circle_fill, circle_outline, draw_bezier, draw_line, ellipse_fill, ellipse_outline,
        fill_convex_polygon, fill_convex_polygon_aa, fill_convex_polygon_offset, masked_blit,
        quick_blit, rect_fill, rect_outline, resize, scale_down_blit, scale_up_blit, CubicBezier,
        Drawable, T_ONE,
    };
    pub use crate::surface::Surface;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
