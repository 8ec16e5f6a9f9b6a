//! Horizontal and vertical spans, and clipped line drawing.
//!
//! Spans are the building block for every filled primitive. Opaque spans are
//! written with a slice fill; translucent spans composite pixel by pixel.

use crate::color::Rgba;
use crate::contracts::clip_contracts;
use crate::geometry::ClipRect;
use crate::surface::Surface;

/// Write `color` over every pixel in `span`.
#[inline]
pub(crate) fn fill_span(span: &mut [Rgba], color: Rgba) {
    match color.a {
        255 => span.fill(color),
        0 => {}
        _ => {
            for pixel in span {
                *pixel = color.composite_over(*pixel);
            }
        }
    }
}

// ============================================================================
// Spans
// ============================================================================

impl Surface {
    /// Draw `len` pixels rightwards from `(x, y)` without clipping.
    ///
    /// The caller guarantees the whole span lies on the surface. Non-positive
    /// lengths draw nothing.
    #[inline]
    pub fn hline_unclipped(&mut self, x: i32, y: i32, len: i32, color: Rgba) {
        if len <= 0 {
            return;
        }
        debug_assert!(self.in_bounds(x, y) && self.in_bounds(x + len - 1, y));
        fill_span(self.span_mut(x, y, len as usize), color);
    }

    /// Draw `len` pixels downwards from `(x, y)` without clipping.
    pub fn vline_unclipped(&mut self, x: i32, y: i32, len: i32, color: Rgba) {
        if len <= 0 || color.a == 0 {
            return;
        }
        debug_assert!(self.in_bounds(x, y) && self.in_bounds(x, y + len - 1));
        let stride = self.width() as usize;
        let mut idx = self.pixel_index(x, y);
        let pixels = self.pixels_mut();
        for _ in 0..len {
            pixels[idx] = color.composite_over(pixels[idx]);
            idx += stride;
        }
    }

    /// Draw `len` pixels rightwards from `(x, y)`, clipped to the clip rectangle.
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: Rgba) {
        let clip = self.clip_rect();
        if y < clip.top || y >= clip.bottom || len <= 0 {
            return;
        }
        let start = x.max(clip.left);
        let end = x.saturating_add(len).min(clip.right);
        if end > start {
            debug_assert!(clip_contracts::span_within_clip(&clip, start, y, end - start));
            self.hline_unclipped(start, y, end - start, color);
        }
    }

    /// Draw `len` pixels downwards from `(x, y)`, clipped to the clip rectangle.
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: Rgba) {
        let clip = self.clip_rect();
        if x < clip.left || x >= clip.right || len <= 0 {
            return;
        }
        let start = y.max(clip.top);
        let end = y.saturating_add(len).min(clip.bottom);
        if end > start {
            self.vline_unclipped(x, start, end - start, color);
        }
    }
}

/// Horizontal span covering `x_lo..=x_hi` on row `y`, clipped.
fn hline_between(surface: &mut Surface, x_lo: i32, x_hi: i32, y: i32, color: Rgba) {
    let clip = surface.clip_rect();
    if y < clip.top || y >= clip.bottom {
        return;
    }
    let start = x_lo.max(clip.left);
    let end = (i64::from(x_hi) + 1).min(i64::from(clip.right)) as i32;
    if end > start {
        surface.hline_unclipped(start, y, end - start, color);
    }
}

/// Vertical span covering `y_lo..=y_hi` in column `x`, clipped.
fn vline_between(surface: &mut Surface, x: i32, y_lo: i32, y_hi: i32, color: Rgba) {
    let clip = surface.clip_rect();
    if x < clip.left || x >= clip.right {
        return;
    }
    let start = y_lo.max(clip.top);
    let end = (i64::from(y_hi) + 1).min(i64::from(clip.bottom)) as i32;
    if end > start {
        surface.vline_unclipped(x, start, end - start, color);
    }
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line between two points, both endpoints included.
///
/// Uses a run-length slice variant of Bresenham's algorithm: the line is
/// drawn as horizontal (or vertical) runs whose lengths are decided once per
/// minor-axis step. Endpoints are normalised so that drawing `a -> b` and
/// `b -> a` produce the same pixels.
///
/// Segments that leave the clip rectangle are clipped parametrically against
/// its edges first, so no pixel outside the clip is ever touched.
///
/// # Example
///
/// ```
/// use pixrast::prelude::*;
///
/// let mut surface = Surface::new(16, 16).unwrap();
/// draw_line(&mut surface, 0, 0, 15, 4, Rgba::WHITE);
/// assert_eq!(surface.get(0, 0), Some(Rgba::WHITE));
/// assert_eq!(surface.get(15, 4), Some(Rgba::WHITE));
/// ```
pub fn draw_line(surface: &mut Surface, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
    let (x1, y1, x2, y2) = if y1 > y2 {
        (x2, y2, x1, y1)
    } else {
        (x1, y1, x2, y2)
    };

    let clip = surface.clip_rect();
    if clip.is_empty() {
        return;
    }

    if clip.contains(x1, y1) && clip.contains(x2, y2) {
        line_unclipped(surface, x1, y1, x2, y2, color);
        return;
    }

    if x1 == x2 {
        vline_between(surface, x1, y1, y2, color);
    } else if y1 == y2 {
        hline_between(surface, x1.min(x2), x1.max(x2), y1, color);
    } else if let Some((x1, y1, x2, y2)) = clip_segment(&clip, x1, y1, x2, y2) {
        line_unclipped(surface, x1, y1, x2, y2, color);
    }
}

/// Clip a sloped segment (`y1 < y2`, `x1 != x2`) against `clip`.
///
/// Returns the visible part with both endpoints inside `clip`, or `None`.
fn clip_segment(
    clip: &ClipRect,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> Option<(i32, i32, i32, i32)> {
    let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));
    let (left, top) = (i64::from(clip.left), i64::from(clip.top));
    let (right, bottom) = (i64::from(clip.right) - 1, i64::from(clip.bottom) - 1);

    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;

    if y1 < top {
        let t = (top - y1) as f64 / dy;
        if t > 1.0 {
            return None;
        }
        t_min = t_min.max(t);
    }
    if y2 > bottom {
        let t = (bottom - y1) as f64 / dy;
        if t < 0.0 {
            return None;
        }
        t_max = t_max.min(t);
    }

    // Entering and leaving edges swap when the line runs leftwards
    let (enter_x, leave_x, enters_late, leaves_early) = if dx > 0.0 {
        (left, right, x1 < left, x2 > right)
    } else {
        (right, left, x1 > right, x2 < left)
    };
    if enters_late {
        let t = (enter_x - x1) as f64 / dx;
        if t > 1.0 {
            return None;
        }
        t_min = t_min.max(t);
    }
    if leaves_early {
        let t = (leave_x - x1) as f64 / dx;
        if t < 0.0 {
            return None;
        }
        t_max = t_max.min(t);
    }

    if t_min > t_max {
        return None;
    }

    let at = |t: f64| {
        let x = (x1 + (dx * t).round() as i64).clamp(left, right);
        let y = (y1 + (dy * t).round() as i64).clamp(top, bottom);
        (x as i32, y as i32)
    };
    let (cx1, cy1) = at(t_min);
    let (cx2, cy2) = at(t_max);
    Some((cx1, cy1, cx2, cy2))
}

/// Rasterise a segment whose endpoints both lie inside the clip rectangle.
fn line_unclipped(surface: &mut Surface, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
    debug_assert!(y1 <= y2);
    let dy = y2 - y1;
    let dx = x2 - x1;

    if dx == 0 {
        surface.vline_unclipped(x1, y1, dy + 1, color);
        return;
    }
    if dy == 0 {
        surface.hline_unclipped(x1.min(x2), y1, dx.abs() + 1, color);
        return;
    }

    let x_advance = dx.signum();
    let dx = dx.abs();

    if dx == dy {
        for i in 0..=dx {
            surface.set_unclipped(x1 + i * x_advance, y1 + i, color);
        }
        return;
    }

    let mut run = RunWriter {
        surface,
        x: x1,
        y: y1,
        x_advance,
        color,
    };
    if dx > dy {
        let mut slices = RunSlices::new(dx, dy);
        run.horizontal(slices.initial);
        for _ in 0..dy - 1 {
            let len = slices.next_run();
            run.horizontal(len);
        }
        run.horizontal(slices.last);
    } else {
        let mut slices = RunSlices::new(dy, dx);
        run.vertical(slices.initial);
        for _ in 0..dx - 1 {
            let len = slices.next_run();
            run.vertical(len);
        }
        run.vertical(slices.last);
    }
}

/// Cursor that emits runs along the major axis of a line.
struct RunWriter<'a> {
    surface: &'a mut Surface,
    x: i32,
    y: i32,
    x_advance: i32,
    color: Rgba,
}

impl RunWriter<'_> {
    /// Emit `len` pixels along x, then step one row down.
    fn horizontal(&mut self, len: i32) {
        let start = if self.x_advance > 0 {
            self.x
        } else {
            self.x - len + 1
        };
        self.surface.hline_unclipped(start, self.y, len, self.color);
        self.x += self.x_advance * len;
        self.y += 1;
    }

    /// Emit `len` pixels down the column, then step one column across.
    fn vertical(&mut self, len: i32) {
        self.surface.vline_unclipped(self.x, self.y, len, self.color);
        self.y += len;
        self.x += self.x_advance;
    }
}

/// Run-length state for a line with `major > minor > 0`.
///
/// Each minor step gets `whole_step` pixels plus one more whenever the
/// accumulated error crosses zero. The first and last runs split a whole
/// step between them so the line is symmetric about its midpoint.
struct RunSlices {
    whole_step: i32,
    adj_up: i32,
    adj_down: i32,
    error_term: i32,
    initial: i32,
    last: i32,
}

impl RunSlices {
    fn new(major: i32, minor: i32) -> Self {
        let whole_step = major / minor;
        let adj_up = (major % minor) * 2;
        let adj_down = minor * 2;
        let mut error_term = (major % minor) - minor * 2;

        let last = whole_step / 2 + 1;
        let mut initial = last;
        // With no remainder and an even step, the spare pixel goes to the end
        if adj_up == 0 && whole_step & 1 == 0 {
            initial -= 1;
        }
        // An odd step leaves half a pixel of error for the middle runs
        if whole_step & 1 != 0 {
            error_term += minor;
        }

        Self {
            whole_step,
            adj_up,
            adj_down,
            error_term,
            initial,
            last,
        }
    }

    fn next_run(&mut self) -> i32 {
        let mut len = self.whole_step;
        self.error_term += self.adj_up;
        if self.error_term > 0 {
            len += 1;
            self.error_term -= self.adj_down;
        }
        len
    }
}
