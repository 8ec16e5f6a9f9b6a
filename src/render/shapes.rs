//! Rectangles, circles and axis-aligned ellipses.
//!
//! Filled shapes are drawn as horizontal chords and write each pixel exactly
//! once, so translucent fills blend uniformly. Outlines plot individual
//! pixels through [`Surface::plot`] and never plot the same pixel twice.

use crate::color::Rgba;
use crate::surface::Surface;

// ============================================================================
// Rectangles
// ============================================================================

/// Fill the rectangle `[x, x + w) × [y, y + h)`, clipped.
///
/// Non-positive sizes draw nothing.
pub fn rect_fill(surface: &mut Surface, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
    if w <= 0 || h <= 0 {
        return;
    }
    let clip = surface.clip_rect();
    let left = x.max(clip.left);
    let right = (i64::from(x) + i64::from(w)).min(i64::from(clip.right)) as i32;
    let top = y.max(clip.top);
    let bottom = (i64::from(y) + i64::from(h)).min(i64::from(clip.bottom)) as i32;
    if right <= left {
        return;
    }

    for row in top..bottom {
        surface.hline_unclipped(left, row, right - left, color);
    }
}

/// Draw the one-pixel border of the rectangle `[x, x + w) × [y, y + h)`.
///
/// Corner pixels are written once.
pub fn rect_outline(surface: &mut Surface, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
    if w <= 0 || h <= 0 {
        return;
    }
    let bottom = y.saturating_add(h - 1);
    let right = x.saturating_add(w - 1);

    surface.hline(x, y, w, color);
    if h > 1 {
        surface.hline(x, bottom, w, color);
    }
    if h > 2 {
        surface.vline(x, y.saturating_add(1), h - 2, color);
        if w > 1 {
            surface.vline(right, y.saturating_add(1), h - 2, color);
        }
    }
}

// ============================================================================
// Circles
// ============================================================================

/// Plot a pixel given in wide coordinates, dropping anything off the i32 range.
#[inline]
fn plot_wide(surface: &mut Surface, x: i64, y: i64, color: Rgba) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        surface.plot(x, y, color);
    }
}

/// Draw the chord `[cx - half, cx + half]` on row `cy + dy`, and on row
/// `cy - dy` when `dy` is non-zero.
fn chord_pair(surface: &mut Surface, cx: i64, cy: i64, dy: i64, half: i64, color: Rgba) {
    let clip = surface.clip_rect();
    let left = (cx - half).max(i64::from(clip.left));
    let right = (cx + half + 1).min(i64::from(clip.right));
    if right <= left {
        return;
    }

    let rows: &[i64] = if dy == 0 { &[0] } else { &[dy, -dy] };
    for &d in rows {
        let row = cy + d;
        if row >= i64::from(clip.top) && row < i64::from(clip.bottom) {
            surface.hline_unclipped(left as i32, row as i32, (right - left) as i32, color);
        }
    }
}

/// Walk one octant of a midpoint circle, from `(radius, 0)` until `x < y`.
fn circle_octant(radius: i64, mut visit: impl FnMut(i64, i64)) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        visit(x, y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a circle outline using the midpoint algorithm.
///
/// A radius of zero plots the centre pixel; a negative radius draws nothing.
pub fn circle_outline(surface: &mut Surface, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));

    circle_octant(i64::from(radius), |x, y| {
        let candidates = [
            (x, y),
            (y, x),
            (-x, y),
            (-y, x),
            (-x, -y),
            (-y, -x),
            (x, -y),
            (y, -x),
        ];
        // Octants meet on the axes and diagonals
        let mut plotted = [(0, 0); 8];
        let mut count = 0;
        for offset in candidates {
            if plotted[..count].contains(&offset) {
                continue;
            }
            plotted[count] = offset;
            count += 1;
            plot_wide(surface, cx + offset.0, cy + offset.1, color);
        }
    });
}

/// Fill a circle using the midpoint algorithm.
///
/// The disc is drawn as horizontal chords, one per row.
///
/// # Example
///
/// ```
/// use pixrast::prelude::*;
///
/// let mut surface = Surface::new(9, 9).unwrap();
/// circle_fill(&mut surface, 4, 4, 3, Rgba::RED);
/// assert_eq!(surface.get(4, 4), Some(Rgba::RED));
/// assert_eq!(surface.get(0, 0), Some(Rgba::TRANSPARENT));
/// ```
pub fn circle_fill(surface: &mut Surface, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));

    // Rows at distance y from the centre get their chord on the step that
    // reaches them. Rows at distance x can be reached by several steps; the
    // widest chord is the last one before x changes.
    let mut far_row = i64::from(radius);
    let mut far_half = 0;
    let mut last_near_row = 0;
    circle_octant(i64::from(radius), |x, y| {
        chord_pair(surface, cx, cy, y, x, color);
        last_near_row = y;

        if x != far_row {
            chord_pair(surface, cx, cy, far_row, far_half, color);
            far_row = x;
        }
        far_half = y;
    });
    if far_row > last_near_row {
        chord_pair(surface, cx, cy, far_row, far_half, color);
    }
}

// ============================================================================
// Ellipses
// ============================================================================

/// Walk the first quadrant of a midpoint ellipse from `(0, ry)` to `(x, 0)`.
///
/// Every visited point is distinct and `y` never increases. The decision
/// terms grow with `rx² · ry²` and are kept in 128 bits.
fn ellipse_quadrant(rx: i64, ry: i64, mut visit: impl FnMut(i64, i64)) {
    let rx_sq = i128::from(rx) * i128::from(rx);
    let ry_sq = i128::from(ry) * i128::from(ry);
    let mut x = 0;
    let mut y = ry;
    let mut px: i128 = 0;
    let mut py = 2 * rx_sq * i128::from(y);

    visit(x, y);

    // Region 1: slope shallower than -1
    let mut p = ry_sq - rx_sq * i128::from(ry) + round_quarter(rx_sq);
    while px < py {
        x += 1;
        px += 2 * ry_sq;
        if p < 0 {
            p += ry_sq + px;
        } else {
            y -= 1;
            py -= 2 * rx_sq;
            p += ry_sq + px - py;
        }
        visit(x, y);
    }

    // Region 2: steeper than -1, starting from (x + 1/2, y - 1)
    let (ex, ey) = (2 * i128::from(x) + 1, i128::from(y) - 1);
    p = round_quarter((ry_sq * ex * ex - 4 * rx_sq * ry_sq) + 4 * rx_sq * ey * ey);
    while y > 0 {
        y -= 1;
        py -= 2 * rx_sq;
        if p > 0 {
            p += rx_sq - py;
        } else {
            x += 1;
            px += 2 * ry_sq;
            p += rx_sq - py + px;
        }
        visit(x, y);
    }
}

/// `v / 4` rounded half away from zero.
#[inline]
fn round_quarter(v: i128) -> i128 {
    if v >= 0 {
        (v + 2) / 4
    } else {
        -((2 - v) / 4)
    }
}

/// Draw an axis-aligned ellipse outline with radii `rx` and `ry`.
///
/// Negative radii draw nothing. A zero vertical radius degenerates to the
/// horizontal segment `[cx - rx, cx + rx]`.
pub fn ellipse_outline(surface: &mut Surface, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba) {
    if rx < 0 || ry < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    if ry == 0 {
        chord_pair(surface, cx, cy, 0, i64::from(rx), color);
        return;
    }

    ellipse_quadrant(i64::from(rx), i64::from(ry), |x, y| {
        plot_wide(surface, cx + x, cy + y, color);
        if x != 0 {
            plot_wide(surface, cx - x, cy + y, color);
        }
        if y != 0 {
            plot_wide(surface, cx + x, cy - y, color);
            if x != 0 {
                plot_wide(surface, cx - x, cy - y, color);
            }
        }
    });
}

/// Fill an axis-aligned ellipse with radii `rx` and `ry`.
///
/// Negative radii draw nothing.
pub fn ellipse_fill(surface: &mut Surface, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgba) {
    if rx < 0 || ry < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    if ry == 0 {
        chord_pair(surface, cx, cy, 0, i64::from(rx), color);
        return;
    }

    // Consecutive points share a row until y steps down; the last one is widest
    let mut pending: Option<(i64, i64)> = None;
    ellipse_quadrant(i64::from(rx), i64::from(ry), |x, y| {
        if let Some((px, py)) = pending {
            if py != y {
                chord_pair(surface, cx, cy, py, px, color);
            }
        }
        pending = Some((x, y));
    });
    if let Some((x, y)) = pending {
        chord_pair(surface, cx, cy, y, x, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(surface: &Surface) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.get_unclipped(x, y) != Rgba::TRANSPARENT {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_rect_fill_half_open() {
        let mut surface = Surface::new(10, 10).unwrap();
        rect_fill(&mut surface, 2, 3, 4, 2, Rgba::RED);
        let pixels = lit(&surface);
        assert_eq!(pixels.len(), 8);
        assert!(pixels
            .iter()
            .all(|&(x, y)| (2..6).contains(&x) && (3..5).contains(&y)));
    }

    #[test]
    fn test_rect_fill_clipped_and_degenerate() {
        let mut surface = Surface::new(10, 10).unwrap();
        rect_fill(&mut surface, -5, -5, 7, 7, Rgba::RED);
        assert_eq!(lit(&surface).len(), 4);

        rect_fill(&mut surface, 5, 5, 0, 3, Rgba::RED);
        rect_fill(&mut surface, 5, 5, 3, -1, Rgba::RED);
        rect_fill(&mut surface, i32::MAX - 1, 0, i32::MAX, 5, Rgba::RED);
        assert_eq!(lit(&surface).len(), 4);
    }

    #[test]
    fn test_rect_outline_border_only() {
        let mut surface = Surface::new(10, 10).unwrap();
        rect_outline(&mut surface, 1, 1, 5, 4, Rgba::GREEN);
        let pixels = lit(&surface);
        // Perimeter of a 5x4 box
        assert_eq!(pixels.len(), 14);
        assert_eq!(surface.get(3, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.get(5, 4), Some(Rgba::GREEN));
    }

    #[test]
    fn test_rect_outline_translucent_corners_blend_once() {
        let mut surface = Surface::new(6, 6).unwrap();
        surface.clear(Rgba::WHITE);
        let color = Rgba::new(0, 0, 0, 128);
        rect_outline(&mut surface, 0, 0, 6, 6, color);
        let expected = color.composite_over(Rgba::WHITE);
        assert_eq!(surface.get(0, 0), Some(expected));
        assert_eq!(surface.get(5, 5), Some(expected));
        assert_eq!(surface.get(2, 0), Some(expected));
    }

    #[test]
    fn test_circle_radius_zero_and_negative() {
        let mut surface = Surface::new(5, 5).unwrap();
        circle_outline(&mut surface, 2, 2, -1, Rgba::RED);
        circle_fill(&mut surface, 2, 2, -1, Rgba::RED);
        assert!(lit(&surface).is_empty());

        circle_outline(&mut surface, 2, 2, 0, Rgba::RED);
        assert_eq!(lit(&surface), vec![(2, 2)]);

        let mut surface = Surface::new(5, 5).unwrap();
        circle_fill(&mut surface, 2, 2, 0, Rgba::RED);
        assert_eq!(lit(&surface), vec![(2, 2)]);
    }

    #[test]
    fn test_circle_outline_symmetric() {
        let mut surface = Surface::new(21, 21).unwrap();
        circle_outline(&mut surface, 10, 10, 7, Rgba::WHITE);
        let pixels = lit(&surface);
        for &(x, y) in &pixels {
            assert!(pixels.contains(&(20 - x, y)));
            assert!(pixels.contains(&(x, 20 - y)));
            assert!(pixels.contains(&(y, x)));
        }
        assert!(pixels.contains(&(17, 10)));
        assert!(pixels.contains(&(10, 3)));
        assert_eq!(surface.get(10, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_circle_fill_rows_are_contiguous() {
        let mut surface = Surface::new(21, 21).unwrap();
        circle_fill(&mut surface, 10, 10, 6, Rgba::WHITE);
        for y in 4..=16 {
            let row: Vec<_> = (0..21)
                .filter(|&x| surface.get_unclipped(x, y) != Rgba::TRANSPARENT)
                .collect();
            assert!(!row.is_empty());
            assert_eq!(row.len() as i32, row[row.len() - 1] - row[0] + 1);
            assert_eq!(row[0] + row[row.len() - 1], 20);
        }
        assert_eq!(surface.get(10, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_circle_fill_contains_outline() {
        let mut outline = Surface::new(40, 40).unwrap();
        let mut fill = Surface::new(40, 40).unwrap();
        circle_outline(&mut outline, 20, 20, 13, Rgba::WHITE);
        circle_fill(&mut fill, 20, 20, 13, Rgba::WHITE);
        for (x, y) in lit(&outline) {
            assert_eq!(fill.get(x, y), Some(Rgba::WHITE));
        }
    }

    #[test]
    fn test_translucent_circle_fill_blends_once() {
        let mut surface = Surface::new(30, 30).unwrap();
        surface.clear(Rgba::WHITE);
        let color = Rgba::new(0, 0, 0, 100);
        circle_fill(&mut surface, 15, 15, 11, color);
        let expected = color.composite_over(Rgba::WHITE);
        for y in 0..30 {
            for x in 0..30 {
                let p = surface.get_unclipped(x, y);
                assert!(p == Rgba::WHITE || p == expected, "({x}, {y}) = {p:?}");
            }
        }
    }

    #[test]
    fn test_ellipse_outline_small() {
        let mut surface = Surface::new(9, 7).unwrap();
        ellipse_outline(&mut surface, 4, 3, 3, 2, Rgba::WHITE);
        let mut pixels = lit(&surface);
        pixels.sort();
        let mut expected = Vec::new();
        for (x, y) in [(0, 2), (1, 2), (2, 1), (3, 0)] {
            for (sx, sy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
                let p = (4 + sx * x, 3 + sy * y);
                if !expected.contains(&p) {
                    expected.push(p);
                }
            }
        }
        expected.sort();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_ellipse_fill_translucent_blends_once() {
        let mut surface = Surface::new(40, 30).unwrap();
        surface.clear(Rgba::WHITE);
        let color = Rgba::new(255, 0, 0, 77);
        ellipse_fill(&mut surface, 20, 15, 17, 9, color);
        let expected = color.composite_over(Rgba::WHITE);
        let painted = surface
            .pixels()
            .iter()
            .filter(|&&p| p == expected)
            .count();
        assert!(painted > 0);
        assert!(surface
            .pixels()
            .iter()
            .all(|&p| p == Rgba::WHITE || p == expected));
        assert_eq!(surface.get(20, 15), Some(expected));
        assert_eq!(surface.get(3, 15), Some(expected));
        assert_eq!(surface.get(20, 6), Some(expected));
        assert_eq!(surface.get(20, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_ellipse_degenerate_radii() {
        let mut surface = Surface::new(11, 11).unwrap();
        ellipse_fill(&mut surface, 5, 5, 3, 0, Rgba::WHITE);
        assert_eq!(lit(&surface), vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5), (7, 5), (8, 5)]);

        let mut surface = Surface::new(11, 11).unwrap();
        ellipse_outline(&mut surface, 5, 5, 0, 2, Rgba::WHITE);
        assert_eq!(lit(&surface), vec![(5, 3), (5, 4), (5, 5), (5, 6), (5, 7)]);

        let mut surface = Surface::new(11, 11).unwrap();
        ellipse_outline(&mut surface, 5, 5, -1, 2, Rgba::WHITE);
        assert!(lit(&surface).is_empty());
    }

    #[test]
    fn test_shapes_respect_clip() {
        let mut surface = Surface::new(30, 30).unwrap();
        surface.set_clip_rect(10, 10, 10, 10);
        circle_fill(&mut surface, 10, 10, 8, Rgba::WHITE);
        ellipse_outline(&mut surface, 20, 20, 12, 5, Rgba::WHITE);
        rect_outline(&mut surface, 5, 5, 20, 20, Rgba::WHITE);
        let clip = surface.clip_rect();
        let pixels = lit(&surface);
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| clip.contains(x, y)));
    }

    #[test]
    fn test_huge_ellipse_clips_to_small_surface() {
        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_fill(&mut surface, 4, 4, 70_000, 70_000, Rgba::WHITE);
        assert_eq!(lit(&surface).len(), 64);

        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_outline(&mut surface, 4, 4, 70_000, 70_000, Rgba::WHITE);
        assert!(lit(&surface).is_empty());

        // The top of the outline is flat across the whole surface
        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_outline(&mut surface, 4, 70_004, 70_000, 70_000, Rgba::WHITE);
        assert_eq!(lit(&surface), (0..8).map(|x| (x, 4)).collect::<Vec<_>>());

        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_fill(&mut surface, 4, 70_004, 70_000, 70_000, Rgba::WHITE);
        let pixels = lit(&surface);
        assert_eq!(pixels.len(), 32);
        assert!(pixels.iter().all(|&(_, y)| y >= 4));
    }

    #[test]
    fn test_ellipse_radii_past_i64_products() {
        // rx² · ry² no longer fits in 64 bits
        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_fill(&mut surface, 4, 4, 1_000_000, 1_000_000, Rgba::WHITE);
        assert_eq!(lit(&surface).len(), 64);

        let mut surface = Surface::new(8, 8).unwrap();
        ellipse_outline(&mut surface, -1_000_000, 4, 1_000_003, 2_000_000, Rgba::WHITE);
        assert_eq!(lit(&surface), (0..8).map(|y| (3, y)).collect::<Vec<_>>());
    }
}
