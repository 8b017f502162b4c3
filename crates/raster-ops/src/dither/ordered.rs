//! Ordered (Bayer) dithering.
//!
//! Instead of propagating error, every pixel is compared against a
//! fixed, position-dependent threshold from a Bayer matrix. The matrix
//! tiles the image periodically, so the output pattern is deterministic
//! and local -- nothing bleeds across edges.

use crate::buffer::{Color, PixelBuffer};
use crate::error::OpsError;

/// Index matrix of the recursive Bayer construction, before
/// normalization: level 0 is `[[0, 2], [3, 1]]`; each level composes
/// four offset copies of the previous one, doubling the dimension.
/// The result is a permutation of `0..dim*dim`.
fn bayer_indices(level: u32) -> Vec<u32> {
    let mut dim = 2usize;
    let mut indices = vec![0u32, 2, 3, 1];

    // Iterative doubling: [[4p+0, 4p+2], [4p+3, 4p+1]].
    for _ in 0..level {
        let next_dim = dim * 2;
        let mut next = vec![0u32; next_dim * next_dim];
        for y in 0..dim {
            for x in 0..dim {
                let base = 4 * indices[y * dim + x];
                next[y * next_dim + x] = base;
                next[y * next_dim + x + dim] = base + 2;
                next[(y + dim) * next_dim + x] = base + 3;
                next[(y + dim) * next_dim + x + dim] = base + 1;
            }
        }
        dim = next_dim;
        indices = next;
    }

    indices
}

/// An immutable N x N Bayer threshold map, N a power of two, with
/// entries normalized into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ThresholdMatrix {
    dim: usize,
    thresholds: Vec<f32>,
}

impl ThresholdMatrix {
    /// Build the level-`n` matrix of dimension `2^(n+1)`.
    pub fn with_level(level: u32) -> Self {
        let indices = bayer_indices(level);
        let dim = 2usize << level;
        debug_assert_eq!(indices.len(), dim * dim);
        let area = (dim * dim) as f32;
        Self {
            dim,
            thresholds: indices.iter().map(|&i| i as f32 / area).collect(),
        }
    }

    /// Build the minimal matrix covering a `tile_w x tile_h` tile.
    ///
    /// Tile dimensions that are not powers of two are covered by the
    /// next larger power-of-two matrix; callers index it modulo the
    /// requested tile dimensions.
    pub fn covering(tile_w: u32, tile_h: u32) -> Self {
        let needed = tile_w.max(tile_h).max(2).next_power_of_two();
        let level = needed.trailing_zeros() - 1;
        Self::with_level(level)
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Threshold at `(row, col)`, taken modulo the dimension.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.thresholds[(row % self.dim) * self.dim + (col % self.dim)]
    }
}

/// Ordered dithering against a Bayer threshold map.
///
/// The covering matrix for the requested tile size is built once, then
/// indexed at `(y % tile_h, x % tile_w)`. A pixel whose mean normalized
/// channel value strictly exceeds its threshold becomes pure white,
/// otherwise pure black -- all three channels snap together.
pub fn ordered_dither(buffer: &mut PixelBuffer, tile_w: u32, tile_h: u32) -> Result<(), OpsError> {
    if tile_w == 0 || tile_h == 0 {
        return Err(OpsError::InvalidTileSize {
            width: tile_w,
            height: tile_h,
        });
    }

    let matrix = ThresholdMatrix::covering(tile_w, tile_h);

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let pixel = buffer.get(x, y);
            let level = (pixel.r + pixel.g + pixel.b) / (3.0 * 255.0);
            let threshold = matrix.get((y % tile_h) as usize, (x % tile_w) as usize);
            let snapped = if level > threshold {
                Color::WHITE
            } else {
                Color::BLACK
            };
            buffer.set(x, y, snapped);
        }
    }

    Ok(())
}
