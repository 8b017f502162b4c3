//! Float-vector color arithmetic.
//!
//! [`Color`] is the transient working representation every transform
//! computes in: four `f32` channels in byte scale (`0.0..=255.0`).
//! Alpha is carried along but ignored by the algorithms themselves;
//! it only matters at write-back time.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A transient RGBA color in byte scale (each channel nominally `0.0..=255.0`).
///
/// Intermediate results (accumulated diffusion error, running sums) may
/// leave the nominal range; conversion back to bytes truncates and
/// saturates at the buffer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 255.0);

    /// Fully opaque white.
    pub const WHITE: Color = Color::new(255.0, 255.0, 255.0, 255.0);

    /// Fully opaque alpha value.
    pub const OPAQUE: f32 = 255.0;

    /// Create a color from explicit channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from raw channel bytes.
    #[inline]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32, a as f32)
    }

    /// Convert to channel bytes, truncating the fractional part.
    ///
    /// Truncation (not rounding) matches the reference write-back
    /// behavior; the `as` cast also saturates out-of-range values at
    /// 0 and 255.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r as u8, self.g as u8, self.b as u8, self.a as u8]
    }

    /// Squared Euclidean distance over the RGB channels only.
    ///
    /// Alpha never participates in distance: transparency is not a
    /// different color.
    #[inline]
    pub fn distance_squared(self, other: Color) -> f32 {
        let dr = other.r - self.r;
        let dg = other.g - self.g;
        let db = other.b - self.b;
        dr * dr + dg * dg + db * db
    }

    /// Perceptual luminance (ITU-R BT.601 weights), in byte scale.
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Scale the RGB channels, leaving alpha untouched.
    #[inline]
    pub fn scale_rgb(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Replace the alpha channel.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
        self.a += rhs.a;
    }
}

impl Sub for Color {
    type Output = Color;

    #[inline]
    fn sub(self, rhs: Color) -> Color {
        Color::new(
            self.r - rhs.r,
            self.g - rhs.g,
            self.b - rhs.b,
            self.a - rhs.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, factor: f32) -> Color {
        Color::new(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_round_trip() {
        let color = Color::from_bytes(12, 34, 56, 78);
        assert_eq!(color.to_bytes(), [12, 34, 56, 78]);
    }

    #[test]
    fn test_to_bytes_truncates() {
        let color = Color::new(10.9, 200.1, 0.5, 254.99);
        assert_eq!(
            color.to_bytes(),
            [10, 200, 0, 254],
            "Fractional parts must be dropped, not rounded"
        );
    }

    #[test]
    fn test_to_bytes_saturates() {
        let color = Color::new(-5.0, 300.0, 128.0, 255.0);
        assert_eq!(color.to_bytes(), [0, 255, 128, 255]);
    }

    #[test]
    fn test_distance_squared_ignores_alpha() {
        let a = Color::new(10.0, 20.0, 30.0, 0.0);
        let b = Color::new(10.0, 20.0, 30.0, 255.0);
        assert_eq!(a.distance_squared(b), 0.0, "Alpha must not affect distance");
    }

    #[test]
    fn test_distance_squared_black_white() {
        let d = Color::BLACK.distance_squared(Color::WHITE);
        assert_eq!(d, 3.0 * 255.0 * 255.0);
    }

    #[test]
    fn test_luminance_weights_sum_to_one() {
        let white = Color::WHITE.luminance();
        assert!((white - 255.0).abs() < 1e-3, "White should stay white");
    }

    #[test]
    fn test_arithmetic() {
        let sum = Color::new(1.0, 2.0, 3.0, 4.0) + Color::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(sum, Color::new(11.0, 22.0, 33.0, 44.0));

        let scaled = sum * 0.5;
        assert_eq!(scaled, Color::new(5.5, 11.0, 16.5, 22.0));

        let diff = sum - Color::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(diff, Color::new(10.0, 20.0, 30.0, 40.0));
    }
}
