//! ASCII-art rendering.
//!
//! Maps luminance onto a nine-step density ramp, dark to light. Rows
//! sample at twice the column stride because terminal character cells
//! are roughly twice as tall as they are wide.

use raster_ops::PixelBuffer;

/// Density ramp, darkest first.
const RAMP: &[u8] = b"@%#*+=-:.";

/// Render the buffer as ASCII art, sampling every `resolution` columns
/// and every `2 * resolution` rows. A `resolution` of 1 maps every
/// pixel column to one character.
pub fn render(buffer: &PixelBuffer, resolution: u32) -> String {
    debug_assert!(resolution > 0, "resolution must be at least 1");
    let step_x = resolution.max(1);
    let step_y = step_x * 2;

    let cols = buffer.width().div_ceil(step_x) as usize;
    let rows = buffer.height().div_ceil(step_y) as usize;
    let mut out = String::with_capacity(rows * (cols + 1));

    for y in (0..buffer.height()).step_by(step_y as usize) {
        for x in (0..buffer.width()).step_by(step_x as usize) {
            let level = buffer.get(x, y).luminance() / 255.0;
            let index = ((level * RAMP.len() as f32) as usize).min(RAMP.len() - 1);
            out.push(RAMP[index] as char);
        }
        out.push('\n');
    }

    out
}
