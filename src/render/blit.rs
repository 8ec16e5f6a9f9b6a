//! Copying pixels between surfaces.
//!
//! Every blit clips against the destination's clip rectangle. Blits copy
//! source pixels verbatim rather than compositing them; [`masked_blit`]
//! additionally skips fully transparent source pixels.

use crate::color::Rgba;
use crate::geometry::ClipRect;
use crate::surface::Surface;

/// Overlap between a source surface placed at `(x, y)` and a clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlitRegion {
    dst_x: i32,
    dst_y: i32,
    src_x: usize,
    src_y: u32,
    width: usize,
    height: u32,
}

impl BlitRegion {
    fn new(clip: ClipRect, x: i32, y: i32, src_width: u32, src_height: u32) -> Option<Self> {
        let (x, y) = (i64::from(x), i64::from(y));
        let left = x.max(i64::from(clip.left));
        let top = y.max(i64::from(clip.top));
        let right = (x + i64::from(src_width)).min(i64::from(clip.right));
        let bottom = (y + i64::from(src_height)).min(i64::from(clip.bottom));
        if right <= left || bottom <= top {
            return None;
        }

        Some(Self {
            dst_x: left as i32,
            dst_y: top as i32,
            src_x: (left - x) as usize,
            src_y: (top - y) as u32,
            width: (right - left) as usize,
            height: (bottom - top) as u32,
        })
    }

    /// Visit each row as (source row, destination span).
    fn for_each_row(
        self,
        dst: &mut Surface,
        src: &Surface,
        mut f: impl FnMut(&[Rgba], &mut [Rgba]),
    ) {
        for row in 0..self.height {
            let Some(src_row) = src.row(self.src_y + row) else {
                return;
            };
            let src_span = &src_row[self.src_x..self.src_x + self.width];
            let dst_span = dst.span_mut(self.dst_x, self.dst_y + row as i32, self.width);
            f(src_span, dst_span);
        }
    }
}

/// Copy `src` onto `dst` at `(x, y)`, skipping source pixels with zero alpha.
///
/// Every other source pixel replaces the destination pixel outright.
pub fn masked_blit(dst: &mut Surface, x: i32, y: i32, src: &Surface) {
    let Some(region) = BlitRegion::new(dst.clip_rect(), x, y, src.width(), src.height()) else {
        return;
    };
    region.for_each_row(dst, src, |src_span, dst_span| {
        for (d, &s) in dst_span.iter_mut().zip(src_span) {
            if s.a > 0 {
                *d = s;
            }
        }
    });
}

/// Copy `src` onto `dst` at `(x, y)` row by row, alpha included.
///
/// # Example
///
/// ```
/// use pixrast::prelude::*;
///
/// let mut sprite = Surface::new(2, 2).unwrap();
/// sprite.clear(Rgba::RED);
/// let mut screen = Surface::new(4, 4).unwrap();
/// quick_blit(&mut screen, 3, 3, &sprite);
/// assert_eq!(screen.get(3, 3), Some(Rgba::RED));
/// assert_eq!(screen.get(2, 2), Some(Rgba::TRANSPARENT));
/// ```
pub fn quick_blit(dst: &mut Surface, x: i32, y: i32, src: &Surface) {
    let Some(region) = BlitRegion::new(dst.clip_rect(), x, y, src.width(), src.height()) else {
        return;
    };
    region.for_each_row(dst, src, |src_span, dst_span| dst_span.copy_from_slice(src_span));
}

/// Shrink `src` by an integer `scale` with a box filter and copy it to `(x, y)`.
///
/// Each output pixel is the average colour of a `scale × scale` block of
/// source pixels and is fully opaque. Partial blocks at the right and bottom
/// of the source are dropped. A non-positive scale draws nothing.
pub fn scale_down_blit(dst: &mut Surface, x: i32, y: i32, scale: i32, src: &Surface) {
    if scale <= 0 {
        return;
    }
    let scale_u = scale as u32;
    let out_w = src.width() / scale_u;
    let out_h = src.height() / scale_u;
    let Some(region) = BlitRegion::new(dst.clip_rect(), x, y, out_w, out_h) else {
        return;
    };
    let block = u64::from(scale_u) * u64::from(scale_u);

    for row in 0..region.height {
        let out_y = region.src_y + row;
        for col in 0..region.width {
            let out_x = (region.src_x + col) as u32;
            let (mut r, mut g, mut b) = (0_u64, 0_u64, 0_u64);
            for sy in out_y * scale_u..(out_y + 1) * scale_u {
                let src_row = src.row(sy).unwrap_or_default();
                let start = (out_x * scale_u) as usize;
                for p in src_row.iter().skip(start).take(scale_u as usize) {
                    r += u64::from(p.r);
                    g += u64::from(p.g);
                    b += u64::from(p.b);
                }
            }
            let color = Rgba::rgb((r / block) as u8, (g / block) as u8, (b / block) as u8);
            let idx = dst.pixel_index(region.dst_x + col as i32, region.dst_y + row as i32);
            dst.pixels_mut()[idx] = color;
        }
    }
}

/// Enlarge `src` by an integer `scale` with pixel replication and copy it to
/// `(x, y)`.
///
/// A non-positive scale draws nothing.
pub fn scale_up_blit(dst: &mut Surface, x: i32, y: i32, scale: i32, src: &Surface) {
    if scale <= 0 {
        return;
    }
    let scale_u = scale as u32;
    let scaled = (src.width().checked_mul(scale_u), src.height().checked_mul(scale_u));
    let (out_w, out_h) = match scaled {
        (Some(w), Some(h)) => (w, h),
        _ => (u32::MAX, u32::MAX),
    };
    let Some(region) = BlitRegion::new(dst.clip_rect(), x, y, out_w, out_h) else {
        return;
    };

    for row in 0..region.height {
        let Some(src_row) = src.row((region.src_y + row) / scale_u) else {
            return;
        };
        let dst_span = dst.span_mut(region.dst_x, region.dst_y + row as i32, region.width);
        for (col, d) in dst_span.iter_mut().enumerate() {
            let sx = (region.src_x + col) / scale_u as usize;
            if let Some(&s) = src_row.get(sx) {
                *d = s;
            }
        }
    }
}

/// Number of bits each sample weight is shifted right by so that a 32-bit
/// accumulator cannot overflow when many source pixels feed one output pixel.
fn weight_shift(src_w: i64, src_h: i64, dst_w: i64, dst_h: i64) -> u32 {
    let texels = (src_w as f64 / dst_w as f64 + 1.0) * (src_h as f64 / dst_h as f64 + 1.0);
    let accumulated = texels * 256.0 * 256.0 * 256.0;
    let ratio = accumulated / 4_294_967_000.0;
    if ratio > 1.0 {
        (ratio.log2().ceil() as u32).min(15)
    } else {
        0
    }
}

/// Resample `src` into the `w × h` rectangle at `(x, y)` of `dst`.
///
/// When both axes are enlarged each output pixel is a bilinear blend of the
/// nearest 2 × 2 source pixels. Otherwise each output pixel averages every
/// source pixel its footprint touches, weighting partial pixels at the
/// footprint border by their covered fraction. Weights are 8.8 fixed point.
///
/// All four channels are resampled and written without compositing.
/// Non-positive sizes draw nothing.
pub fn resize(dst: &mut Surface, x: i32, y: i32, w: i32, h: i32, src: &Surface) {
    if w <= 0 || h <= 0 {
        return;
    }
    let clip = dst.clip_rect();
    let (x, y, dst_w, dst_h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
    let (src_w, src_h) = (i64::from(src.width()), i64::from(src.height()));

    let cols = (i64::from(clip.left) - x).max(0)..(i64::from(clip.right) - x).min(dst_w);
    let rows = (i64::from(clip.top) - y).max(0)..(i64::from(clip.bottom) - y).min(dst_h);
    if cols.is_empty() || rows.is_empty() {
        return;
    }

    if src_w < dst_w && src_h < dst_h {
        let max_x1a = (256 * (src_w - 1) - 1).max(0);
        let max_y1a = (256 * (src_h - 1) - 1).max(0);
        for y2 in rows {
            let y1a = (y2 * 256 * src_h / dst_h).min(max_y1a);
            let (y1c, fy) = (y1a >> 8, (y1a & 0xff) as u64);
            let y1n = (y1c + 1).min(src_h - 1);
            for x2 in cols.clone() {
                let x1a = (x2 * 256 * src_w / dst_w).min(max_x1a);
                let (x1c, fx) = (x1a >> 8, (x1a & 0xff) as u64);
                let x1n = (x1c + 1).min(src_w - 1);

                let samples = [
                    (x1c, y1c, (256 - fx) * (256 - fy)),
                    (x1n, y1c, fx * (256 - fy)),
                    (x1c, y1n, (256 - fx) * fy),
                    (x1n, y1n, fx * fy),
                ];
                let mut acc = [0_u64; 4];
                for (sx, sy, weight) in samples {
                    let c = src.get_unclipped(sx as i32, sy as i32).to_array();
                    for (a, ch) in acc.iter_mut().zip(c) {
                        *a += u64::from(ch) * weight;
                    }
                }
                let out = Rgba::from_array(acc.map(|a| (a >> 16) as u8));
                let idx = dst.pixel_index((x + x2) as i32, (y + y2) as i32);
                dst.pixels_mut()[idx] = out;
            }
        }
        return;
    }

    let shift = weight_shift(src_w, src_h, dst_w, dst_h);
    if shift > 0 {
        log::debug!("resize {src_w}x{src_h} -> {dst_w}x{dst_h}: weight shift {shift}");
    }

    // Footprint of output cell `i` along an axis, in 8.8 source coordinates,
    // and the weight of source cell `s` within it
    let footprint = |i: i64, src_len: i64, dst_len: i64| {
        let a = i * 256 * src_len / dst_len;
        let b = ((i + 1) * 256 * src_len / dst_len).min(256 * src_len - 1);
        (a, b)
    };
    let weight = |s: i64, (a, b): (i64, i64)| -> u64 {
        let (first, last) = (a >> 8, b >> 8);
        if first == last {
            256
        } else if s == first {
            (256 - (a & 0xff)) as u64
        } else if s == last {
            (b & 0xff) as u64
        } else {
            256
        }
    };

    for y2 in rows {
        let fy = footprint(y2, src_h, dst_h);
        for x2 in cols.clone() {
            let fx = footprint(x2, src_w, dst_w);
            let mut acc = [0_u64; 4];
            let mut total = 0_u64;
            for sy in fy.0 >> 8..=fy.1 >> 8 {
                let wy = weight(sy, fy);
                for sx in fx.0 >> 8..=fx.1 >> 8 {
                    let w = (weight(sx, fx) * wy) >> shift;
                    let c = src.get_unclipped(sx as i32, sy as i32).to_array();
                    for (a, ch) in acc.iter_mut().zip(c) {
                        *a += u64::from(ch) * w;
                    }
                    total += w;
                }
            }
            let total = total.max(1);
            let out = Rgba::from_array(acc.map(|a| (a / total) as u8));
            let idx = dst.pixel_index((x + x2) as i32, (y + y2) as i32);
            dst.pixels_mut()[idx] = out;
        }
    }
}
