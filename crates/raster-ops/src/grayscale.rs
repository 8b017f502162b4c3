//! Luminance grayscale conversion.

use crate::buffer::{Color, PixelBuffer};

/// Collapse every pixel to its BT.601 luminance.
///
/// The weighted sum is truncated to a byte before being replicated to
/// all three channels, so the result is an exact gray. Source alpha is
/// preserved.
pub fn to_grayscale(buffer: &mut PixelBuffer) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let pixel = buffer.get(x, y);
            let gray = pixel.luminance() as u8 as f32;
            buffer.set(x, y, Color::new(gray, gray, gray, pixel.a));
        }
    }
}
