//! Box-average resolution reduction (pixelation).
//!
//! The image is partitioned into `tile_w x tile_h` tiles; each tile is
//! replaced by its mean color, replicated over the whole tile. The
//! result keeps the original dimensions -- it looks like a lower
//! resolution image without actually shrinking the buffer, which is
//! what the ASCII renderer and the mosaic preview build on.
//!
//! # Edge handling
//!
//! When the dimensions do not divide evenly, three remainder strips are
//! averaged with their *true* extent as divisor, never the nominal tile
//! area: a right-hand strip of width `width % tile_w`, a bottom strip of
//! height `height % tile_h`, and the bottom-right corner. A strip whose
//! extent is zero is skipped entirely.

use crate::buffer::{Color, PixelBuffer};
use crate::error::OpsError;

/// Mean color over an arbitrary rectangle, divided by its true extent.
fn average_region(buffer: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32) -> Color {
    debug_assert!(w > 0 && h > 0, "average over an empty region");
    let mut sum = Color::default();
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            sum += buffer.get(x, y);
        }
    }
    sum * (1.0 / (w * h) as f32)
}

/// Replicate one color over a rectangle.
fn fill_region(buffer: &mut PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, color: Color) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            buffer.set(x, y, color);
        }
    }
}

/// Replace every tile with its box-average color.
///
/// Tile size `1x1` is the identity transform. Zero tile dimensions are
/// rejected before any pixel is touched.
pub fn pixelate(buffer: &mut PixelBuffer, tile_w: u32, tile_h: u32) -> Result<(), OpsError> {
    if tile_w == 0 || tile_h == 0 {
        return Err(OpsError::InvalidTileSize {
            width: tile_w,
            height: tile_h,
        });
    }

    let width = buffer.width();
    let height = buffer.height();
    let full_w = width - width % tile_w;
    let full_h = height - height % tile_h;
    let rem_w = width - full_w;
    let rem_h = height - full_h;

    // Full tiles.
    for ty in (0..full_h).step_by(tile_h as usize) {
        for tx in (0..full_w).step_by(tile_w as usize) {
            let mean = average_region(buffer, tx, ty, tile_w, tile_h);
            fill_region(buffer, tx, ty, tile_w, tile_h, mean);
        }
    }

    // Right-hand strip: narrower tiles, full tile height.
    if rem_w > 0 {
        for ty in (0..full_h).step_by(tile_h as usize) {
            let mean = average_region(buffer, full_w, ty, rem_w, tile_h);
            fill_region(buffer, full_w, ty, rem_w, tile_h, mean);
        }
    }

    // Bottom strip: shorter tiles, full tile width.
    if rem_h > 0 {
        for tx in (0..full_w).step_by(tile_w as usize) {
            let mean = average_region(buffer, tx, full_h, tile_w, rem_h);
            fill_region(buffer, tx, full_h, tile_w, rem_h, mean);
        }
    }

    // Bottom-right corner.
    if rem_w > 0 && rem_h > 0 {
        let mean = average_region(buffer, full_w, full_h, rem_w, rem_h);
        fill_region(buffer, full_w, full_h, rem_w, rem_h, mean);
    }

    Ok(())
}
