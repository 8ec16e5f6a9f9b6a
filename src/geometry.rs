//! Integer geometric primitives.
//!
//! All coordinates are pixel units unless a function says otherwise. The
//! antialiased polygon fill works in subpixel units, see
//! [`SUBPIXELS_PER_PIXEL`].

/// Number of subpixel units per pixel on each axis for antialiased vertices.
pub const SUBPIXELS_PER_PIXEL: i32 = 16;

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a pixel-space point into subpixel space.
    #[must_use]
    pub const fn to_subpixel(self) -> Self {
        Self::new(self.x * SUBPIXELS_PER_PIXEL, self.y * SUBPIXELS_PER_PIXEL)
    }

    /// Translate by an offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a pixel lies inside the half-open rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Get the area of the rectangle (zero for degenerate sizes).
    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

/// Half-open clip region `[left, right) × [top, bottom)`.
///
/// A clip rectangle produced by [`ClipRect::clamped`] always satisfies
/// `0 <= left <= right <= width` and `0 <= top <= bottom <= height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipRect {
    /// Leftmost writable column.
    pub left: i32,
    /// Topmost writable row.
    pub top: i32,
    /// One past the rightmost writable column.
    pub right: i32,
    /// One past the bottom writable row.
    pub bottom: i32,
}

impl ClipRect {
    /// Clip rectangle covering a whole `width × height` surface.
    #[must_use]
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        }
    }

    /// Clamp the rectangle `(x, y, w, h)` to a `width × height` surface.
    ///
    /// Negative sizes and rectangles entirely off the surface collapse to an
    /// empty region; the edges never cross.
    #[must_use]
    pub fn clamped(x: i32, y: i32, w: i32, h: i32, width: u32, height: u32) -> Self {
        let max_x = width as i32;
        let max_y = height as i32;
        let left = x.clamp(0, max_x);
        let top = y.clamp(0, max_y);
        let right = x.saturating_add(w.max(0)).clamp(left, max_x);
        let bottom = y.saturating_add(h.max(0)).clamp(top, max_y);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the region.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the region.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether nothing can be drawn inside the region.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Whether pixel `(x, y)` is writable.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

impl From<ClipRect> for Rect {
    fn from(clip: ClipRect) -> Self {
        Rect::new(clip.left, clip.top, clip.width(), clip.height())
    }
}

/// An owned convex polygon outline.
///
/// Vertices are connected in order and the last vertex connects back to the
/// first. Convexity is not enforced on construction: the fill routines
/// validate the outline and skip anything they cannot draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvexPolygon {
    points: Vec<Point>,
}

impl ConvexPolygon {
    /// Create a polygon from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle, wound anticlockwise on screen.
    #[must_use]
    pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(vec![
            Point::new(x, y),
            Point::new(x, y + height),
            Point::new(x + width, y + height),
            Point::new(x + width, y),
        ])
    }

    /// The vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertices scaled into subpixel space.
    #[must_use]
    pub fn to_subpixel(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.to_subpixel()).collect()
    }
}

impl From<Vec<Point>> for ConvexPolygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
