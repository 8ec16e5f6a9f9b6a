//! Design-by-contract checks for the rasterizer.
//!
//! Each function states an invariant the drawing code relies on. They are
//! called from `debug_assert!` sites and from the polygon validators, and
//! double as checked documentation.

/// Clip rectangle invariants.
///
/// #[invariant(0 <= clip.left <= clip.right <= width)]
/// #[invariant(0 <= clip.top <= clip.bottom <= height)]
pub mod clip_contracts {
    use crate::geometry::ClipRect;

    /// Whether `clip` lies inside a `width × height` surface without inverting.
    ///
    /// #[ensures(result == true ==> clip.width() >= 0 && clip.height() >= 0)]
    #[must_use]
    pub fn clip_within_bounds(clip: &ClipRect, width: u32, height: u32) -> bool {
        0 <= clip.left
            && clip.left <= clip.right
            && i64::from(clip.right) <= i64::from(width)
            && 0 <= clip.top
            && clip.top <= clip.bottom
            && i64::from(clip.bottom) <= i64::from(height)
    }

    /// Whether the span `[x, x + len)` on row `y` lies inside `clip`.
    ///
    /// #[requires(len > 0)]
    #[must_use]
    pub fn span_within_clip(clip: &ClipRect, x: i32, y: i32, len: i32) -> bool {
        len > 0 && clip.contains(x, y) && i64::from(x) + i64::from(len) <= i64::from(clip.right)
    }
}

/// Polygon shape invariants.
///
/// #[requires(points.len() >= 3)]
/// #[invariant(every horizontal line crosses at most two active edges)]
pub mod polygon_contracts {
    use std::cmp::Ordering;

    use crate::geometry::Point;

    /// Direction in which a convex outline is wound, as seen on screen
    /// (y grows downwards).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Winding {
        /// Every turn has a non-positive cross product.
        Anticlockwise,
        /// Every turn has a non-negative cross product.
        Clockwise,
    }

    /// Cross product of the edges `a -> b` and `b -> c`.
    ///
    /// #[ensures(result < 0 ==> the path turns anticlockwise on screen at b)]
    #[inline]
    #[must_use]
    pub fn turn(a: Point, b: Point, c: Point) -> i128 {
        // Edge deltas need 33 bits, so their products need 66
        let e1x = i128::from(b.x) - i128::from(a.x);
        let e1y = i128::from(b.y) - i128::from(a.y);
        let e2x = i128::from(c.x) - i128::from(b.x);
        let e2y = i128::from(c.y) - i128::from(b.y);
        e1x * e2y - e1y * e2x
    }

    /// Classify a closed outline as a convex polygon.
    ///
    /// Returns `None` for fewer than three vertices, for outlines whose
    /// consecutive turns disagree in sign, for fully collinear outlines and
    /// for self-overlapping outlines whose vertical direction reverses more
    /// than twice.
    ///
    /// #[ensures(result.is_some() ==> points.len() >= 3)]
    #[must_use]
    pub fn classify(points: &[Point]) -> Option<Winding> {
        let n = points.len();
        if n < 3 {
            return None;
        }

        let mut negative = false;
        let mut positive = false;
        for i in 0..n {
            let t = turn(points[i], points[(i + 1) % n], points[(i + 2) % n]);
            negative |= t < 0;
            positive |= t > 0;
        }

        if !y_monotone_chains(points) {
            return None;
        }

        match (negative, positive) {
            (true, false) => Some(Winding::Anticlockwise),
            (false, true) => Some(Winding::Clockwise),
            _ => None,
        }
    }

    /// Whether the outline splits into one descending and one ascending chain.
    fn y_monotone_chains(points: &[Point]) -> bool {
        let n = points.len();
        let mut first = Ordering::Equal;
        let mut previous = Ordering::Equal;
        let mut reversals = 0;

        for i in 0..n {
            let dy = points[(i + 1) % n].y.cmp(&points[i].y);
            if dy == Ordering::Equal {
                continue;
            }
            if previous == Ordering::Equal {
                first = dy;
            } else if dy != previous {
                reversals += 1;
            }
            previous = dy;
        }
        if previous != Ordering::Equal && previous != first {
            reversals += 1;
        }

        reversals <= 2
    }
}

/// Antialiasing coverage invariants.
///
/// #[invariant(fully covered pixels on a scanline form one contiguous run)]
pub mod coverage_contracts {
    /// Whether every entry equal to `full` belongs to a single contiguous run.
    ///
    /// Each subpixel row of a convex polygon is one interval, so two fully
    /// covered pixels imply every pixel between them is fully covered.
    ///
    /// #[ensures(result == true ==> no partial pixel sits between two full ones)]
    #[must_use]
    pub fn full_run_is_contiguous<T: PartialEq + Copy>(coverage: &[T], full: T) -> bool {
        let first = coverage.iter().position(|&c| c == full);
        let last = coverage.iter().rposition(|&c| c == full);
        match (first, last) {
            (Some(first), Some(last)) => coverage[first..=last].iter().all(|&c| c == full),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::clip_contracts::*;
    use super::coverage_contracts::*;
    use super::polygon_contracts::*;
    use crate::geometry::{ClipRect, Point};

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_clip_within_bounds() {
        assert!(clip_within_bounds(&ClipRect::full(10, 10), 10, 10));
        assert!(clip_within_bounds(&ClipRect::clamped(3, 3, 4, 4, 10, 10), 10, 10));
        let bad = ClipRect {
            left: 5,
            top: 0,
            right: 4,
            bottom: 10,
        };
        assert!(!clip_within_bounds(&bad, 10, 10));
        assert!(!clip_within_bounds(&ClipRect::full(11, 10), 10, 10));
    }

    #[test]
    fn test_span_within_clip() {
        let clip = ClipRect::clamped(2, 2, 5, 5, 10, 10);
        assert!(span_within_clip(&clip, 2, 2, 5));
        assert!(!span_within_clip(&clip, 2, 2, 6));
        assert!(!span_within_clip(&clip, 2, 2, 0));
        assert!(!span_within_clip(&clip, 1, 2, 1));
    }

    #[test]
    fn test_turn_sign() {
        // Down the left side then right along the bottom: anticlockwise on screen
        assert!(turn(Point::new(0, 0), Point::new(0, 4), Point::new(4, 4)) < 0);
        assert!(turn(Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)) > 0);
        assert_eq!(turn(Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)), 0);
    }

    #[test]
    fn test_classify_square_both_windings() {
        let acw = pts(&[(0, 0), (0, 4), (4, 4), (4, 0)]);
        let cw = pts(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        assert_eq!(classify(&acw), Some(Winding::Anticlockwise));
        assert_eq!(classify(&cw), Some(Winding::Clockwise));
    }

    #[test]
    fn test_classify_allows_collinear_vertices() {
        let poly = pts(&[(0, 0), (0, 2), (0, 4), (4, 4), (4, 0)]);
        assert_eq!(classify(&poly), Some(Winding::Anticlockwise));
    }

    #[test]
    fn test_classify_rejects_concave() {
        let arrow = pts(&[(0, 0), (2, 2), (0, 4), (4, 4), (4, 0)]);
        assert_eq!(classify(&arrow), None);
    }

    #[test]
    fn test_classify_rejects_degenerate() {
        assert_eq!(classify(&pts(&[(0, 0), (1, 1)])), None);
        assert_eq!(classify(&pts(&[(0, 0), (1, 1), (2, 2)])), None);
    }

    #[test]
    fn test_classify_rejects_pentagram() {
        // Every turn has the same sign but the outline winds twice
        let star = pts(&[(50, 0), (20, 95), (97, 36), (3, 36), (80, 95)]);
        assert_eq!(classify(&star), None);
    }

    #[test]
    fn test_classify_extreme_coordinates() {
        let (lo, hi) = (i32::MIN, i32::MAX);
        let square = pts(&[(lo, lo), (lo, hi), (hi, hi), (hi, lo)]);
        assert_eq!(classify(&square), Some(Winding::Anticlockwise));
        let sliver = pts(&[(0, -2_000_000_000), (0, 2_000_000_000), (10, 0)]);
        assert_eq!(classify(&sliver), Some(Winding::Anticlockwise));
        let bowtie = pts(&[(lo, lo), (hi, hi), (hi, lo), (lo, hi)]);
        assert_eq!(classify(&bowtie), None);
        assert!(turn(Point::new(lo, lo), Point::new(lo, hi), Point::new(hi, hi)) < 0);
    }

    #[test]
    fn test_full_run_is_contiguous() {
        assert!(full_run_is_contiguous(&[0, 10, 128, 128, 40, 0], 128));
        assert!(full_run_is_contiguous(&[12, 9, 30], 128));
        assert!(full_run_is_contiguous::<i64>(&[], 128));
        assert!(!full_run_is_contiguous(&[0, 128, 40, 128, 0], 128));
    }
}
