//! Value-semantics transform chaining.
//!
//! [`Pipeline`] owns one [`PixelBuffer`] and threads it through a chain
//! of transforms. Each stage consumes the pipeline and returns it (or a
//! parameter error), so a buffer is never aliased between stages and
//! every deep copy is an explicit [`fork`](Pipeline::fork) call --
//! there are no hidden copies on chaining.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use raster_ops::{DiffusionKernel, Pipeline, PixelBuffer};
//!
//! let buffer = PixelBuffer::new(16, 16, 3).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = Pipeline::new(buffer)
//!     .pixelate(2, 2).unwrap()
//!     .quantize(4, false, &mut rng).unwrap()
//!     .diffuse(DiffusionKernel::FloydSteinberg)
//!     .finish();
//!
//! assert_eq!(result.width(), 16);
//! ```

use crate::buffer::PixelBuffer;
use crate::dither::{diffuse, ordered_dither, DiffusionKernel};
use crate::error::OpsError;
use crate::grayscale::to_grayscale;
use crate::mosaic::{mosaic, mosaic_with_centers};
use crate::quantize::kmeans;
use crate::resample::pixelate;
use rand::Rng;

/// A transform chain over a single owned buffer.
#[derive(Debug, Clone)]
pub struct Pipeline {
    buffer: PixelBuffer,
}

impl Pipeline {
    /// Start a pipeline by taking ownership of the buffer.
    pub fn new(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Explicit deep copy: branch the chain without disturbing this one.
    pub fn fork(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }

    /// Collapse every pixel to its luminance.
    pub fn grayscale(mut self) -> Self {
        to_grayscale(&mut self.buffer);
        self
    }

    /// Box-average pixelation with the given tile size.
    pub fn pixelate(mut self, tile_w: u32, tile_h: u32) -> Result<Self, OpsError> {
        pixelate(&mut self.buffer, tile_w, tile_h)?;
        Ok(self)
    }

    /// K-means quantization to at most `k` colors.
    pub fn quantize(
        mut self,
        k: u32,
        maintain_alpha: bool,
        rng: &mut impl Rng,
    ) -> Result<Self, OpsError> {
        kmeans(&mut self.buffer, k, maintain_alpha, rng)?;
        Ok(self)
    }

    /// Error diffusion dithering with the selected kernel.
    pub fn diffuse(mut self, kernel: DiffusionKernel) -> Self {
        diffuse(&mut self.buffer, kernel);
        self
    }

    /// Ordered (Bayer) dithering with the given tile size.
    pub fn ordered_dither(mut self, tile_w: u32, tile_h: u32) -> Result<Self, OpsError> {
        ordered_dither(&mut self.buffer, tile_w, tile_h)?;
        Ok(self)
    }

    /// Voronoi mosaic with uniformly random centers.
    pub fn mosaic(mut self, regions: u32, rng: &mut impl Rng) -> Result<Self, OpsError> {
        mosaic(&mut self.buffer, regions, rng)?;
        Ok(self)
    }

    /// Voronoi mosaic with externally supplied centers.
    pub fn mosaic_with_centers(mut self, centers: &[(f32, f32)]) -> Result<Self, OpsError> {
        mosaic_with_centers(&mut self.buffer, centers)?;
        Ok(self)
    }

    /// Borrow the current buffer state.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// End the chain, releasing the buffer.
    pub fn finish(self) -> PixelBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height, 3).unwrap();
        for (x, y) in buf.coordinates().collect::<Vec<_>>() {
            buf.set(
                x,
                y,
                Color::from_bytes((x * 16) as u8, (y * 16) as u8, 99, 255),
            );
        }
        buf
    }

    #[test]
    fn test_chain_preserves_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = Pipeline::new(gradient(12, 10))
            .grayscale()
            .pixelate(3, 3)
            .unwrap()
            .quantize(4, false, &mut rng)
            .unwrap()
            .finish();
        assert_eq!(result.width(), 12);
        assert_eq!(result.height(), 10);
    }

    #[test]
    fn test_invalid_stage_propagates_error() {
        let result = Pipeline::new(gradient(4, 4)).pixelate(0, 2);
        assert!(matches!(result, Err(OpsError::InvalidTileSize { .. })));
    }

    #[test]
    fn test_fork_is_independent() {
        let base = Pipeline::new(gradient(6, 6));
        let branch = base.fork();
        let dithered = branch.diffuse(DiffusionKernel::Atkinson).finish();
        let untouched = base.finish();
        assert_ne!(
            dithered, untouched,
            "the fork must have diverged from the original"
        );
        assert_eq!(untouched, gradient(6, 6), "the original must be untouched");
    }

    #[test]
    fn test_pipeline_matches_direct_calls() {
        let mut direct = gradient(8, 8);
        to_grayscale(&mut direct);
        ordered_dither(&mut direct, 4, 4).unwrap();

        let chained = Pipeline::new(gradient(8, 8))
            .grayscale()
            .ordered_dither(4, 4)
            .unwrap()
            .finish();

        assert_eq!(chained, direct);
    }
}
