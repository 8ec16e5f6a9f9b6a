//! Cubic Bezier curves.
//!
//! The curve parameter `t` is fixed point: `0` is the start point and
//! [`T_ONE`] (65536) the end point.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::surface::Surface;

use super::span::draw_line;

/// Fixed-point value of `t = 1.0`.
pub const T_ONE: i32 = 65536;

/// Step used when the sampled curve length is zero.
const DEGENERATE_STEP: i32 = 1000;

/// Curve length times step is kept near this value, giving a segment every
/// three pixels or so.
const STEP_BUDGET: f64 = 200_000.0;

/// A cubic Bezier curve with integer control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub a: Point,
    /// First control point.
    pub b: Point,
    /// Second control point.
    pub c: Point,
    /// End point.
    pub d: Point,
}

impl CubicBezier {
    /// Create a curve from its four control points.
    #[must_use]
    pub const fn new(a: Point, b: Point, c: Point, d: Point) -> Self {
        Self { a, b, c, d }
    }

    /// Weighted sum of the control points, truncated towards zero.
    fn combine(&self, w: [f64; 4]) -> Point {
        let axis = |p: [i32; 4]| {
            (f64::from(p[0]) * w[0]
                + f64::from(p[1]) * w[1]
                + f64::from(p[2]) * w[2]
                + f64::from(p[3]) * w[3]) as i32
        };
        Point::new(
            axis([self.a.x, self.b.x, self.c.x, self.d.x]),
            axis([self.a.y, self.b.y, self.c.y, self.d.y]),
        )
    }

    /// Point on the curve at fixed-point parameter `t`.
    ///
    /// # Example
    ///
    /// ```
    /// use pixrast::prelude::*;
    ///
    /// let curve = CubicBezier::new(
    ///     Point::new(0, 0),
    ///     Point::new(0, 100),
    ///     Point::new(100, 100),
    ///     Point::new(100, 0),
    /// );
    /// assert_eq!(curve.position(0), Point::new(0, 0));
    /// assert_eq!(curve.position(T_ONE), Point::new(100, 0));
    /// assert_eq!(curve.position(T_ONE / 2), Point::new(50, 75));
    /// ```
    #[must_use]
    pub fn position(&self, t: i32) -> Point {
        let dt = f64::from(t) / f64::from(T_ONE);
        let nt = 1.0 - dt;
        self.combine([nt * nt * nt, 3.0 * nt * nt * dt, 3.0 * nt * dt * dt, dt * dt * dt])
    }

    /// Derivative of the curve at fixed-point parameter `t`.
    #[must_use]
    pub fn tangent(&self, t: i32) -> Point {
        let dt = f64::from(t) / f64::from(T_ONE);
        let nt = 1.0 - dt;
        self.combine([
            -3.0 * nt * nt,
            3.0 * (1.0 - 4.0 * dt + 3.0 * dt * dt),
            3.0 * (2.0 * dt - 3.0 * dt * dt),
            3.0 * dt * dt,
        ])
    }

    /// Rough arc length from the chords through `t = 0, ¼, ½, ¾, 1`.
    #[must_use]
    pub fn approx_length(&self) -> f64 {
        let mut previous = self.a;
        let mut total = 0.0;
        for t in (T_ONE / 4..T_ONE).step_by((T_ONE / 4) as usize) {
            let next = self.position(t);
            total += previous.distance(next);
            previous = next;
        }
        total + previous.distance(self.d)
    }

    /// Parameter increment used when flattening the curve into lines.
    #[must_use]
    pub fn flatten_step(&self) -> i32 {
        let length = self.approx_length();
        if length > 0.0 {
            ((STEP_BUDGET / length) as i32).max(1)
        } else {
            DEGENERATE_STEP
        }
    }
}

/// Draw a cubic Bezier curve as a chain of straight lines.
///
/// The curve always ends exactly on `curve.d`.
pub fn draw_bezier(surface: &mut Surface, curve: &CubicBezier, color: Rgba) {
    let step = curve.flatten_step();
    let mut previous = curve.a;

    let mut t = step;
    while t < T_ONE {
        let next = curve.position(t);
        draw_line(surface, previous.x, previous.y, next.x, next.y, color);
        previous = next;
        t += step;
    }

    draw_line(surface, previous.x, previous.y, curve.d.x, curve.d.y, color);
}
