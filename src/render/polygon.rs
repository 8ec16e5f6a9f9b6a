//! Solid convex polygon fill.
//!
//! Edges are scan converted with an all-integer error term and the polygon is
//! drawn as one horizontal span per scanline. A pixel `(x, y)` is filled when
//! the point `(x, y)` lies inside the outline, counting the top and left
//! edges as inside and the bottom and right edges as outside. Adjacent
//! polygons sharing an edge therefore never overlap or leave gaps.

use std::ops::Range;

use crate::color::Rgba;
use crate::contracts::polygon_contracts;
use crate::geometry::Point;
use crate::surface::Surface;

/// Half-open column range `[start, end)` of one scanline.
#[derive(Debug, Clone, Copy, Default)]
struct RowSpan {
    start: i64,
    end: i64,
}

/// Which side of the spans an edge chain writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Writes scan converted edge positions into the visible part of a span list.
struct EdgeScanner<'a> {
    spans: &'a mut [RowSpan],
    visible: Range<i64>,
    row: i64,
    side: Side,
}

impl EdgeScanner<'_> {
    fn exhausted(&self) -> bool {
        self.row >= self.visible.end
    }

    #[inline]
    fn store(&mut self, x: i64) {
        if self.visible.contains(&self.row) {
            let span = &mut self.spans[(self.row - self.visible.start) as usize];
            match self.side {
                Side::Left => span.start = x,
                Side::Right => span.end = x,
            }
        }
        self.row += 1;
    }

    /// Scan convert the edge `(x1, y1) -> (x2, y2)`, excluding its last row.
    ///
    /// For each row the leftmost column not to the left of the edge is
    /// stored. With `skip_first` the first row is skipped as well. Rows above
    /// the visible range are stepped over in one jump.
    fn scan_edge(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, skip_first: bool) {
        let height = y2 - y1;
        if height <= 0 {
            return;
        }
        let delta_x = x2 - x1;
        let advance = if delta_x > 0 { 1 } else { -1 };
        let width = delta_x.abs();

        // Each row moves a whole number of columns plus an occasional extra
        // one; the error term stays in (-height, 0]
        let whole = (width / height) * advance;
        let frac = width % height;
        let initial_error = if delta_x >= 0 { 0 } else { 1 - height };

        let mut rows = height - i64::from(skip_first);
        let hidden = (self.visible.start - self.row).clamp(0, rows.max(0));
        self.row += hidden;
        rows -= hidden;
        let skipped = i64::from(skip_first) + hidden;

        // Closed form of `skipped` steps
        let accumulated = i128::from(initial_error) + i128::from(skipped) * i128::from(frac);
        let carries = ceil_div(accumulated, i128::from(height));
        let mut x = x1 + whole * skipped + advance * carries as i64;
        let mut error_term = (accumulated - carries * i128::from(height)) as i64;

        for _ in 0..rows {
            if self.exhausted() {
                return;
            }
            self.store(x);
            x += whole;
            error_term += frac;
            if error_term > 0 {
                x += advance;
                error_term -= height;
            }
        }
    }
}

/// `ceil(a / b)` for a positive `b`.
#[inline]
fn ceil_div(a: i128, b: i128) -> i128 {
    -(-a).div_euclid(b)
}

/// Fill a convex polygon given in pixel coordinates.
///
/// Either winding is accepted. Outlines that are not convex, have fewer
/// than three vertices or have zero height draw nothing.
///
/// # Example
///
/// ```
/// use pixrast::prelude::*;
///
/// let mut surface = Surface::new(8, 8).unwrap();
/// let square = [Point::new(2, 2), Point::new(2, 6), Point::new(6, 6), Point::new(6, 2)];
/// fill_convex_polygon(&mut surface, &square, Rgba::RED);
/// assert_eq!(surface.get(2, 2), Some(Rgba::RED));
/// assert_eq!(surface.get(5, 5), Some(Rgba::RED));
/// assert_eq!(surface.get(6, 6), Some(Rgba::TRANSPARENT));
/// ```
pub fn fill_convex_polygon(surface: &mut Surface, points: &[Point], color: Rgba) {
    fill_convex_polygon_offset(surface, points, 0, 0, color);
}

/// Fill a convex polygon with every vertex translated by `(dx, dy)`.
pub fn fill_convex_polygon_offset(
    surface: &mut Surface,
    points: &[Point],
    dx: i32,
    dy: i32,
    color: Rgba,
) {
    if polygon_contracts::classify(points).is_none() {
        log::trace!("skipping non-convex polygon with {} vertices", points.len());
        return;
    }

    let verts: Vec<(i64, i64)> = points
        .iter()
        .map(|p| (i64::from(p.x) + i64::from(dx), i64::from(p.y) + i64::from(dy)))
        .collect();
    let n = verts.len();
    let forward = |i: usize| (i + 1) % n;
    let backward = |i: usize| (i + n - 1) % n;
    let step = |i: usize, dir: i32| if dir > 0 { forward(i) } else { backward(i) };

    // First topmost and first bottommost vertices
    let mut min_index_l = 0;
    let mut max_index = 0;
    for (i, v) in verts.iter().enumerate().skip(1) {
        if v.1 < verts[min_index_l].1 {
            min_index_l = i;
        } else if v.1 > verts[max_index].1 {
            max_index = i;
        }
    }
    let min_y = verts[min_index_l].1;
    let max_y = verts[max_index].1;
    if min_y == max_y {
        return;
    }

    // Widen the top vertex into the run of vertices sharing its row
    let mut min_index_r = min_index_l;
    while verts[min_index_r].1 == min_y {
        min_index_r = forward(min_index_r);
    }
    min_index_r = backward(min_index_r);
    while verts[min_index_l].1 == min_y {
        min_index_l = backward(min_index_l);
    }
    min_index_l = forward(min_index_l);

    let top_is_flat = verts[min_index_l].0 != verts[min_index_r].0;
    let mut left_dir = -1;
    if top_is_flat {
        if verts[min_index_l].0 > verts[min_index_r].0 {
            left_dir = 1;
            std::mem::swap(&mut min_index_l, &mut min_index_r);
        }
    } else {
        let next = verts[forward(min_index_r)];
        let prev = verts[backward(min_index_l)];
        let top = verts[min_index_l];
        let cross = i128::from(next.0 - top.0) * i128::from(prev.1 - top.1)
            - i128::from(next.1 - top.1) * i128::from(prev.0 - top.0);
        if cross < 0 {
            left_dir = 1;
            std::mem::swap(&mut min_index_l, &mut min_index_r);
        }
    }

    // A pointed top has zero width on its first row, so that row is skipped
    let flat = i64::from(top_is_flat);
    let num_lines = max_y - min_y - 1 + flat;
    if num_lines <= 0 {
        return;
    }
    let start_y = min_y + 1 - flat;

    let clip = surface.clip_rect();
    let visible =
        start_y.max(i64::from(clip.top))..(start_y + num_lines).min(i64::from(clip.bottom));
    if visible.is_empty() {
        return;
    }
    let mut spans = vec![RowSpan::default(); (visible.end - visible.start) as usize];

    for (side, first, dir) in [
        (Side::Left, min_index_l, left_dir),
        (Side::Right, min_index_r, -left_dir),
    ] {
        let mut scanner = EdgeScanner {
            spans: &mut spans,
            visible: visible.clone(),
            row: start_y,
            side,
        };
        let mut previous = first;
        let mut skip_first = !top_is_flat;
        loop {
            let current = step(previous, dir);
            let (x1, y1) = verts[previous];
            let (x2, y2) = verts[current];
            scanner.scan_edge(x1, y1, x2, y2, skip_first);
            previous = current;
            skip_first = false;
            if current == max_index || scanner.exhausted() {
                break;
            }
        }
    }

    let (clip_left, clip_right) = (i64::from(clip.left), i64::from(clip.right));
    for (row, span) in visible.zip(spans) {
        let start = span.start.max(clip_left);
        let end = span.end.min(clip_right);
        if end > start {
            surface.hline_unclipped(start as i32, row as i32, (end - start) as i32, color);
        }
    }
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::tests::inside;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Every triangle covers exactly the pixels the half-open rule admits
        #[test]
        fn prop_triangle_matches_inside_rule(
            a in (-8i32..28, -8i32..28),
            b in (-8i32..28, -8i32..28),
            c in (-8i32..28, -8i32..28),
        ) {
            let mut outline: Vec<(i64, i64)> =
                [a, b, c].iter().map(|&(x, y)| (x.into(), y.into())).collect();
            let cross = (outline[1].0 - outline[0].0) * (outline[2].1 - outline[1].1)
                - (outline[1].1 - outline[0].1) * (outline[2].0 - outline[1].0);
            prop_assume!(cross != 0);
            if cross > 0 {
                outline.reverse();
            }

            let points: Vec<Point> =
                outline.iter().map(|&(x, y)| Point::new(x as i32, y as i32)).collect();
            let mut surface = Surface::new(20, 20).unwrap();
            fill_convex_polygon(&mut surface, &points, Rgba::WHITE);

            for y in 0..20 {
                for x in 0..20 {
                    let want = inside(&outline, x.into(), y.into());
                    let got = surface.get_unclipped(x, y) == Rgba::WHITE;
                    prop_assert_eq!(got, want, "pixel ({}, {}) of {:?}", x, y, outline);
                }
            }
        }
    }
}
