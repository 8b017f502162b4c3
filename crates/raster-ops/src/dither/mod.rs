//! Black/white dithering: error diffusion and ordered thresholding.
//!
//! Both families reduce a continuous-tone image to pure black and pure
//! white pixels; they differ in how they hide the quantization error.
//!
//! - **Error diffusion** ([`diffuse`]) snaps each pixel to the nearer
//!   extreme and pushes the residual onto not-yet-processed neighbors
//!   through a kernel weight table. One generic engine serves all ten
//!   kernels; [`DiffusionKernel`] selects the table.
//! - **Ordered dithering** ([`ordered::ordered_dither`]) compares each
//!   pixel against a fixed, position-dependent Bayer threshold map and
//!   propagates nothing.

mod kernel;
pub mod ordered;

pub use kernel::{
    Kernel, ATKINSON, BURKES, FALSE_FLOYD_STEINBERG, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE,
    SIERRA, SIERRA_LITE, SIERRA_TWO_ROW, SIMPLE, STUCKI,
};
pub use ordered::{ordered_dither, ThresholdMatrix};

use crate::buffer::{Color, PixelBuffer};

/// Selects the weight table for [`diffuse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffusionKernel {
    /// Whole residual to the right neighbor, no row carry.
    Simple,
    /// Classic four-neighbor Floyd-Steinberg.
    FloydSteinberg,
    /// Three-neighbor approximation of Floyd-Steinberg.
    FalseFloydSteinberg,
    /// Twelve neighbors over three rows, smoothest gradients.
    JarvisJudiceNinke,
    /// JJN weights reshaped toward the center, slightly sharper.
    Stucki,
    /// Six equal shares over two rows ahead.
    Atkinson,
    /// Stucki's top two rows, faster with a similar spread.
    Burkes,
    /// Full Sierra, ten neighbors over three rows.
    Sierra,
    /// Two-row Sierra approximation.
    SierraTwoRow,
    /// Minimal three-neighbor Sierra.
    SierraLite,
}

impl DiffusionKernel {
    /// All kernels, in a stable order.
    pub const ALL: [DiffusionKernel; 10] = [
        DiffusionKernel::Simple,
        DiffusionKernel::FloydSteinberg,
        DiffusionKernel::FalseFloydSteinberg,
        DiffusionKernel::JarvisJudiceNinke,
        DiffusionKernel::Stucki,
        DiffusionKernel::Atkinson,
        DiffusionKernel::Burkes,
        DiffusionKernel::Sierra,
        DiffusionKernel::SierraTwoRow,
        DiffusionKernel::SierraLite,
    ];

    /// The static weight table for this kernel.
    pub fn table(self) -> &'static Kernel {
        match self {
            DiffusionKernel::Simple => &SIMPLE,
            DiffusionKernel::FloydSteinberg => &FLOYD_STEINBERG,
            DiffusionKernel::FalseFloydSteinberg => &FALSE_FLOYD_STEINBERG,
            DiffusionKernel::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            DiffusionKernel::Stucki => &STUCKI,
            DiffusionKernel::Atkinson => &ATKINSON,
            DiffusionKernel::Burkes => &BURKES,
            DiffusionKernel::Sierra => &SIERRA,
            DiffusionKernel::SierraTwoRow => &SIERRA_TWO_ROW,
            DiffusionKernel::SierraLite => &SIERRA_LITE,
        }
    }

    /// Snake-case name, used for output file suffixes.
    pub fn name(self) -> &'static str {
        match self {
            DiffusionKernel::Simple => "simple",
            DiffusionKernel::FloydSteinberg => "floyd_steinberg",
            DiffusionKernel::FalseFloydSteinberg => "false_floyd_steinberg",
            DiffusionKernel::JarvisJudiceNinke => "jarvis_judice_ninke",
            DiffusionKernel::Stucki => "stucki",
            DiffusionKernel::Atkinson => "atkinson",
            DiffusionKernel::Burkes => "burkes",
            DiffusionKernel::Sierra => "sierra",
            DiffusionKernel::SierraTwoRow => "sierra_two_row",
            DiffusionKernel::SierraLite => "sierra_lite",
        }
    }
}

/// Sliding accumulator for diffused error.
///
/// Stores only the rows the kernel can reach (`max_dy + 1`) instead of
/// a full-image grid; after each image row the window rotates forward
/// and the vacated row is zeroed.
#[derive(Debug)]
struct ErrorWindow {
    /// rows[0] is the row currently being processed.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorWindow {
    fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated at `x` in the current row.
    #[inline]
    fn accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error at `(x, row_offset)`; out-of-window targets are dropped.
    #[inline]
    fn add(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Rotate the window one row forward.
    fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Snap a value to the nearer of pure black and pure white.
#[inline]
fn snap_to_extreme(r: f32, g: f32, b: f32) -> Color {
    let to_black = r * r + g * g + b * b;
    let dr = 255.0 - r;
    let dg = 255.0 - g;
    let db = 255.0 - b;
    let to_white = dr * dr + dg * dg + db * db;
    if to_white < to_black {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

/// Error diffusion dithering with the selected kernel.
///
/// Processes pixels in raster order: read the pixel plus any error
/// already accumulated at its coordinate, snap to the nearer extreme,
/// and distribute the residual (original-plus-error minus snapped)
/// through the kernel table. Diffusion targets outside the image are
/// dropped by bounds checks, so edge pixels are dithered like any
/// other. The output contains only pure black and pure white pixels,
/// fully opaque.
pub fn diffuse(buffer: &mut PixelBuffer, kernel: DiffusionKernel) {
    let table = kernel.table();
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let divisor = table.divisor as f32;

    let mut errors = ErrorWindow::new(width, table.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let pixel = buffer.get(x as u32, y as u32);
            let carried = errors.accumulated(x);
            let r = pixel.r + carried[0];
            let g = pixel.g + carried[1];
            let b = pixel.b + carried[2];

            let snapped = snap_to_extreme(r, g, b);
            buffer.set(x as u32, y as u32, snapped);

            let residual = [r - snapped.r, g - snapped.g, b - snapped.b];
            for &(dx, dy, weight) in table.entries {
                let nx = x as i32 + dx;
                if nx < 0 || nx as usize >= width {
                    continue;
                }
                let ny = y + dy as usize;
                if ny >= height {
                    continue;
                }
                let share = weight as f32 / divisor;
                errors.add(
                    nx as usize,
                    dy as usize,
                    [
                        residual[0] * share,
                        residual[1] * share,
                        residual[2] * share,
                    ],
                );
            }
        }
        errors.advance_row();
    }
}
