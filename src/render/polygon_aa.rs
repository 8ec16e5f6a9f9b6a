//! Antialiased convex polygon fill.
//!
//! Vertices are given in subpixel units, [`SUBPIXELS_PER_PIXEL`] per pixel on
//! both axes. Each pixel is divided into a 16 × 8 grid of samples: vertex y
//! coordinates are halved to get eight sample rows per pixel row, while x
//! keeps its full sixteen columns. A pixel's alpha is proportional to the
//! number of covered samples.
//!
//! Sample `(sx, sy)` is covered when the row `sy` lies in
//! `[top, bottom)` and the column `sx` lies in `[floor(L(sy)), floor(R(sy)))`
//! where `L` and `R` are the left and right edges of the outline at that
//! row. Each pixel row is accumulated into an eight-entry table and flushed
//! once all its sample rows are known.

use crate::color::Rgba;
use crate::contracts::polygon_contracts::{self, Winding};
use crate::contracts::coverage_contracts;
use crate::geometry::{Point, SUBPIXELS_PER_PIXEL};
use crate::surface::Surface;

/// Sample columns per pixel.
const SUB_X: i64 = SUBPIXELS_PER_PIXEL as i64;
/// Sample rows per pixel.
const SUB_Y: i64 = 8;
/// Vertex y units per sample row.
const Y_SCALE: i64 = SUB_X / SUB_Y;
/// Samples in a fully covered pixel.
const FULL_COVERAGE: i64 = SUB_X * SUB_Y;

/// Sample spans of the pixel row currently being accumulated.
struct Scanline {
    /// Half-open sample column ranges, indexed by sample row within the pixel.
    rows: [Option<(i64, i64)>; SUB_Y as usize],
    left_min: i64,
    right_max: i64,
}

impl Scanline {
    fn new() -> Self {
        Self {
            rows: [None; SUB_Y as usize],
            left_min: i64::MAX,
            right_max: i64::MIN,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn record(&mut self, sample_row: i64, left: i64, right: i64) {
        if right <= left {
            return;
        }
        self.rows[sample_row.rem_euclid(SUB_Y) as usize] = Some((left, right));
        self.left_min = self.left_min.min(left);
        self.right_max = self.right_max.max(right);
    }

    /// Number of covered samples inside pixel column `px`.
    fn coverage(&self, px: i64) -> i64 {
        let cell_left = px * SUB_X;
        let cell_right = cell_left + SUB_X;
        self.rows
            .iter()
            .flatten()
            .map(|&(left, right)| (right.min(cell_right) - left.max(cell_left)).max(0))
            .sum()
    }

    /// Draw pixel row `py` from the accumulated spans, then clear them.
    ///
    /// Partially covered pixels are blended from both ends inwards until a
    /// fully covered pixel is found; everything between the two full pixels
    /// is full as well and is drawn as one span.
    fn flush(&mut self, surface: &mut Surface, py: i64, color: Rgba) {
        let clip = surface.clip_rect();
        if self.left_min >= self.right_max
            || py < i64::from(clip.top)
            || py >= i64::from(clip.bottom)
        {
            self.reset();
            return;
        }

        let first = self.left_min.div_euclid(SUB_X).max(i64::from(clip.left));
        let last = (self.right_max - 1).div_euclid(SUB_X).min(i64::from(clip.right) - 1);
        if first > last {
            self.reset();
            return;
        }
        debug_assert!(coverage_contracts::full_run_is_contiguous(
            &(first..=last).map(|px| self.coverage(px)).collect::<Vec<_>>(),
            FULL_COVERAGE
        ));

        let y = py as i32;
        let mut solid_start = None;
        for px in first..=last {
            let area = self.coverage(px);
            if area == FULL_COVERAGE {
                solid_start = Some(px);
                break;
            }
            blend(surface, px as i32, y, area, color);
        }

        if let Some(start) = solid_start {
            let mut end = last;
            while end > start {
                let area = self.coverage(end);
                if area == FULL_COVERAGE {
                    break;
                }
                blend(surface, end as i32, y, area, color);
                end -= 1;
            }
            surface.hline_unclipped(start as i32, y, (end - start + 1) as i32, color);
        }

        self.reset();
    }
}

/// Composite `color` at a partially covered pixel inside the clip rectangle.
#[inline]
fn blend(surface: &mut Surface, x: i32, y: i32, area: i64, color: Rgba) {
    let alpha = 255 * area / FULL_COVERAGE * i64::from(color.a) / 255;
    if alpha > 0 {
        surface.set_unclipped(x, y, color.with_alpha(alpha as u8));
    }
}

/// Walks one side of the outline from the top vertex downwards.
struct EdgeWalker<'a> {
    verts: &'a [(i64, i64)],
    forward: bool,
    current: usize,
    next: usize,
}

impl<'a> EdgeWalker<'a> {
    fn new(verts: &'a [(i64, i64)], top: usize, forward: bool) -> Self {
        let mut walker = Self {
            verts,
            forward,
            current: top,
            next: top,
        };
        walker.next = walker.step(top);
        walker
    }

    fn step(&self, i: usize) -> usize {
        let n = self.verts.len();
        if self.forward {
            (i + 1) % n
        } else {
            (i + n - 1) % n
        }
    }

    /// Make the active edge the one spanning sample row `y`.
    ///
    /// Horizontal edges are passed over. Returns `false` if the walk wraps
    /// around without finding such an edge.
    fn seek(&mut self, y: i64) -> bool {
        let mut steps = 0;
        while self.verts[self.next].1 <= y {
            if steps == self.verts.len() {
                return false;
            }
            self.current = self.next;
            self.next = self.step(self.next);
            steps += 1;
        }
        true
    }

    /// Edge x at sample row `y`, rounded down to a whole sample column.
    ///
    /// Interpolated in 16.16 fixed point from the edge origin so that the
    /// result is exactly `floor(x0 + dx * (y - y0) / dy)`.
    fn x_at(&self, y: i64) -> i64 {
        let (x0, y0) = self.verts[self.current];
        let (x1, y1) = self.verts[self.next];
        let dy = i128::from(y1 - y0);
        let offset = (i128::from(x1 - x0) << 16) * i128::from(y - y0);
        let fixed = (i128::from(x0) << 16) + offset.div_euclid(dy);
        (fixed >> 16) as i64
    }
}

/// Fill a convex polygon with antialiased edges.
///
/// `points` are in subpixel units (see [`Point::to_subpixel`]) and must be
/// wound anticlockwise as seen on screen, that is down the left side first.
/// Anything else draws nothing. The caller's vertices are not modified.
///
/// Fully covered pixels are drawn with `color`; edge pixels use `color`
/// with its alpha scaled by the covered fraction.
///
/// # Example
///
/// ```
/// use pixrast::prelude::*;
///
/// let mut surface = Surface::new(8, 8).unwrap();
/// surface.clear(Rgba::BLACK);
/// let square = ConvexPolygon::rect(2, 2, 4, 4).to_subpixel();
/// fill_convex_polygon_aa(&mut surface, &square, Rgba::WHITE);
/// assert_eq!(surface.get(2, 2), Some(Rgba::WHITE));
/// assert_eq!(surface.get(6, 6), Some(Rgba::BLACK));
/// ```
pub fn fill_convex_polygon_aa(surface: &mut Surface, points: &[Point], color: Rgba) {
    if polygon_contracts::classify(points) != Some(Winding::Anticlockwise) {
        log::trace!(
            "skipping antialiased polygon with {} vertices: not convex and anticlockwise",
            points.len()
        );
        return;
    }

    let verts: Vec<(i64, i64)> = points
        .iter()
        .map(|p| (i64::from(p.x), i64::from(p.y).div_euclid(Y_SCALE)))
        .collect();

    let mut top = 0;
    for (i, v) in verts.iter().enumerate() {
        if v.1 < verts[top].1 {
            top = i;
        }
    }
    let top_y = verts[top].1;
    let bottom_y = verts.iter().map(|v| v.1).max().unwrap_or(top_y);
    if top_y == bottom_y {
        return;
    }

    let clip = surface.clip_rect();
    let first_row = top_y.max(i64::from(clip.top) * SUB_Y);
    let end_row = bottom_y.min(i64::from(clip.bottom) * SUB_Y);

    let mut left = EdgeWalker::new(&verts, top, true);
    let mut right = EdgeWalker::new(&verts, top, false);
    let mut scanline = Scanline::new();
    let mut last_row = None;

    for y in first_row..end_row {
        if !left.seek(y) || !right.seek(y) {
            break;
        }
        scanline.record(y, left.x_at(y), right.x_at(y));
        last_row = Some(y);
        if y.rem_euclid(SUB_Y) == SUB_Y - 1 {
            scanline.flush(surface, y.div_euclid(SUB_Y), color);
        }
    }

    // The bottom pixel row may end before its last sample row
    if let Some(y) = last_row {
        if y.rem_euclid(SUB_Y) != SUB_Y - 1 {
            scanline.flush(surface, y.div_euclid(SUB_Y), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ConvexPolygon;
    use crate::render::fill_convex_polygon;

    /// Covered sample count per pixel, computed sample by sample.
    fn brute_force_coverage(points: &[Point], width: i64, height: i64) -> Vec<i64> {
        let verts: Vec<(i64, i64)> = points
            .iter()
            .map(|p| (i64::from(p.x), i64::from(p.y).div_euclid(Y_SCALE)))
            .collect();
        let n = verts.len();
        let top = verts.iter().map(|v| v.1).min().unwrap();
        let bottom = verts.iter().map(|v| v.1).max().unwrap();
        let mut out = vec![0; (width * height) as usize];
        let wide = |v: (i64, i64)| (i128::from(v.0), i128::from(v.1));

        for sy in top.max(0)..bottom.min(height * SUB_Y) {
            for sx in 0..width * SUB_X {
                let (sx, sy) = (i128::from(sx), i128::from(sy));
                let covered = (0..n).all(|i| {
                    let (ax, ay) = wide(verts[i]);
                    let (bx, by) = wide(verts[(i + 1) % n]);
                    let (dx, dy) = (bx - ax, by - ay);
                    match dy.signum() {
                        1 => ax * dy + dx * (sy - ay) < (sx + 1) * dy,
                        -1 => (sx + 1 - ax) * dy >= dx * (sy - ay),
                        _ => true,
                    }
                });
                if covered {
                    out[((sy as i64 / SUB_Y) * width + sx as i64 / SUB_X) as usize] += 1;
                }
            }
        }
        out
    }

    fn assert_matches_brute_force(points: &[Point]) {
        let (w, h) = (12, 10);
        let mut surface = Surface::new(w as u32, h as u32).unwrap();
        surface.clear(Rgba::BLACK);
        fill_convex_polygon_aa(&mut surface, points, Rgba::WHITE);

        let coverage = brute_force_coverage(points, w, h);
        for (i, &area) in coverage.iter().enumerate() {
            let alpha = (255 * area / FULL_COVERAGE) as u8;
            let expected = Rgba::WHITE.with_alpha(alpha).composite_over(Rgba::BLACK);
            assert_eq!(surface.pixels()[i], expected, "pixel {i} of {points:?}");
        }
    }

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_pixel_aligned_rect_matches_solid_fill() {
        let rect = ConvexPolygon::rect(2, 1, 5, 6);
        let mut aa = Surface::new(10, 10).unwrap();
        let mut solid = Surface::new(10, 10).unwrap();
        fill_convex_polygon_aa(&mut aa, &rect.to_subpixel(), Rgba::RED);
        fill_convex_polygon(&mut solid, rect.points(), Rgba::RED);
        assert_eq!(aa, solid);
    }

    #[test]
    fn test_half_pixel_edges() {
        // Covers x in [1.5, 3.5) and the full rows 1..3
        let poly = pts(&[(24, 16), (24, 48), (56, 48), (56, 16)]);
        let mut surface = Surface::new(5, 5).unwrap();
        surface.clear(Rgba::BLACK);
        fill_convex_polygon_aa(&mut surface, &poly, Rgba::WHITE);

        let half = Rgba::WHITE.with_alpha(127).composite_over(Rgba::BLACK);
        assert_eq!(surface.get(1, 1), Some(half));
        assert_eq!(surface.get(2, 1), Some(Rgba::WHITE));
        assert_eq!(surface.get(3, 2), Some(half));
        assert_eq!(surface.get(0, 1), Some(Rgba::BLACK));
        assert_eq!(surface.get(2, 3), Some(Rgba::BLACK));
    }

    #[test]
    fn test_matches_brute_force_triangles() {
        assert_matches_brute_force(&pts(&[(13, 5), (40, 150), (170, 71)]));
        assert_matches_brute_force(&pts(&[(100, 0), (3, 90), (190, 158)]));
        assert_matches_brute_force(&pts(&[(-30, -20), (-10, 200), (250, 60)]));
    }

    #[test]
    fn test_matches_brute_force_thin_sliver() {
        assert_matches_brute_force(&pts(&[(0, 40), (0, 43), (190, 60), (190, 57)]));
    }

    #[test]
    fn test_matches_brute_force_odd_vertex_rows() {
        assert_matches_brute_force(&pts(&[(17, 7), (9, 95), (120, 131), (163, 33)]));
    }

    #[test]
    fn test_extreme_coordinates() {
        let (lo, hi) = (i32::MIN, i32::MAX);
        let mut surface = Surface::new(6, 6).unwrap();
        let square = pts(&[(lo, lo), (lo, hi), (hi, hi), (hi, lo)]);
        fill_convex_polygon_aa(&mut surface, &square, Rgba::RED);
        assert!(surface.pixels().iter().all(|&p| p == Rgba::RED));

        assert_matches_brute_force(&pts(&[(0, -2_000_000_000), (0, 2_000_000_000), (160, 0)]));
        assert_matches_brute_force(&pts(&[(lo, 30), (hi, 140), (hi, -90)]));
    }

    #[test]
    fn test_clockwise_is_ignored() {
        let cw: Vec<Point> = ConvexPolygon::rect(1, 1, 4, 4)
            .to_subpixel()
            .into_iter()
            .rev()
            .collect();
        let mut surface = Surface::new(8, 8).unwrap();
        fill_convex_polygon_aa(&mut surface, &cw, Rgba::WHITE);
        assert!(surface.pixels().iter().all(|&p| p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_vertices_not_mutated() {
        let poly = ConvexPolygon::rect(1, 1, 3, 3).to_subpixel();
        let before = poly.clone();
        let mut surface = Surface::new(8, 8).unwrap();
        fill_convex_polygon_aa(&mut surface, &poly, Rgba::WHITE);
        assert_eq!(poly, before);
    }

    #[test]
    fn test_translucent_color_scales_alpha() {
        let poly = pts(&[(24, 16), (24, 48), (56, 48), (56, 16)]);
        let mut surface = Surface::new(5, 5).unwrap();
        surface.clear(Rgba::BLACK);
        let color = Rgba::new(255, 255, 255, 128);
        fill_convex_polygon_aa(&mut surface, &poly, color);
        assert_eq!(surface.get(2, 1), Some(color.composite_over(Rgba::BLACK)));
        // Half coverage of half alpha: 127 * 128 / 255 = 63
        let edge = color.with_alpha(63).composite_over(Rgba::BLACK);
        assert_eq!(surface.get(1, 1), Some(edge));
    }

    #[test]
    fn test_respects_clip() {
        let poly = pts(&[(5, 3), (20, 150), (170, 140), (150, 10)]);
        let mut surface = Surface::new(12, 12).unwrap();
        surface.set_clip_rect(3, 2, 4, 5);
        fill_convex_polygon_aa(&mut surface, &poly, Rgba::WHITE);
        let clip = surface.clip_rect();
        for y in 0..12 {
            for x in 0..12 {
                if !clip.contains(x, y) {
                    assert_eq!(surface.get_unclipped(x, y), Rgba::TRANSPARENT);
                }
            }
        }
        assert_eq!(surface.get(4, 4), Some(Rgba::WHITE));
    }
}
