//! Color type and channel arithmetic.
//!
//! [`Rgba`] is an 8-bit-per-channel, non-premultiplied color. It is a plain
//! value type: every helper is pure and total.

use std::ops::{Add, Mul, Sub};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Whether the color overwrites its destination without blending.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Pack into a single word laid out as `0xAARRGGBB`.
    ///
    /// Two colors are equal exactly when their packed words are equal.
    #[must_use]
    pub const fn to_packed(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack a `0xAARRGGBB` word.
    #[must_use]
    pub const fn from_packed(word: u32) -> Self {
        Self::new(
            (word >> 16) as u8,
            (word >> 8) as u8,
            word as u8,
            (word >> 24) as u8,
        )
    }

    /// Per-channel addition clamped to 255.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.a.saturating_add(other.a),
        )
    }

    /// Per-channel subtraction clamped to 0.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::new(
            self.r.saturating_sub(other.r),
            self.g.saturating_sub(other.g),
            self.b.saturating_sub(other.b),
            self.a.saturating_sub(other.a),
        )
    }

    /// Multiply every channel (alpha included) by `factor`, clamping to [0, 255].
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        let scale = |c: u8| (f32::from(c) * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }

    /// Perceptual brightness: `0.3 r + 0.59 g + 0.11 b`.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.3 * f32::from(self.r) + 0.59 * f32::from(self.g) + 0.11 * f32::from(self.b)
    }

    /// Mix towards `other` by `fraction` (0.0 = self, 1.0 = other).
    ///
    /// The result is always opaque.
    #[must_use]
    pub fn blend_towards(self, other: Self, fraction: f32) -> Self {
        let t = fraction.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::rgb(
            (f32::from(other.r) * t + f32::from(self.r) * inv_t) as u8,
            (f32::from(other.g) * t + f32::from(self.g) * inv_t) as u8,
            (f32::from(other.b) * t + f32::from(self.b) * inv_t) as u8,
        )
    }

    /// Composite this color over `dst`.
    ///
    /// Each RGB channel becomes `(src * a + dst * (255 - a)) / 255` with
    /// integer truncation. Opaque sources replace `dst` outright; the
    /// destination alpha is preserved otherwise.
    #[inline]
    #[must_use]
    pub const fn composite_over(self, dst: Self) -> Self {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let a = a as u32;
                let inv_a = 255 - a;
                Self::new(
                    ((self.r as u32 * a + dst.r as u32 * inv_a) / 255) as u8,
                    ((self.g as u32 * a + dst.g as u32 * inv_a) / 255) as u8,
                    ((self.b as u32 * a + dst.b as u32 * inv_a) / 255) as u8,
                    dst.a,
                )
            }
        }
    }
}

/// Per-channel wrapping addition.
impl Add for Rgba {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.r.wrapping_add(other.r),
            self.g.wrapping_add(other.g),
            self.b.wrapping_add(other.b),
            self.a.wrapping_add(other.a),
        )
    }
}

/// Per-channel wrapping subtraction.
impl Sub for Rgba {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.r.wrapping_sub(other.r),
            self.g.wrapping_sub(other.g),
            self.b.wrapping_sub(other.b),
            self.a.wrapping_sub(other.a),
        )
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        self.scale(factor)
    }
}

impl From<u32> for Rgba {
    fn from(word: u32) -> Self {
        Self::from_packed(word)
    }
}

impl From<Rgba> for u32 {
    fn from(color: Rgba) -> Self {
        color.to_packed()
    }
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_rgba() -> impl Strategy<Value = Rgba> {
        any::<[u8; 4]>().prop_map(Rgba::from_array)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Compositing keeps every channel between source and destination
        #[test]
        fn prop_composite_between_endpoints(src in any_rgba(), dst in any_rgba()) {
            let out = src.composite_over(dst);
            let (o, s, d) = (out.to_array(), src.to_array(), dst.to_array());
            for i in 0..3 {
                prop_assert!(
                    o[i] >= s[i].min(d[i]) && o[i] <= s[i].max(d[i]),
                    "{:?} over {:?} = {:?}",
                    src,
                    dst,
                    out
                );
            }
        }

        /// Destination alpha survives any translucent source
        #[test]
        fn prop_composite_preserves_dst_alpha(src in any_rgba(), dst in any_rgba()) {
            prop_assume!(src.a < 255);
            prop_assert_eq!(src.composite_over(dst).a, dst.a);
        }

        /// Packed words round-trip
        #[test]
        fn prop_packed_round_trip(color in any_rgba()) {
            prop_assert_eq!(Rgba::from_packed(color.to_packed()), color);
        }
    }
}
