//! raster-ops: pixel-level image transforms
//!
//! This library provides the pixel-domain building blocks of the `pixim`
//! toolkit: box-average pixelation, k-means color quantization, ordered
//! and error-diffusion dithering, Voronoi mosaics, and Poisson-disk
//! point sampling. Every transform operates in place on a
//! [`PixelBuffer`] and is deterministic given its inputs; transforms
//! that need randomness take an injected [`rand::Rng`], so a seeded
//! generator reproduces a run exactly.
//!
//! # Quick Start
//!
//! The [`Pipeline`] builder is the primary entry point:
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use raster_ops::{DiffusionKernel, Pipeline, PixelBuffer};
//!
//! let buffer = PixelBuffer::new(32, 32, 3).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let result = Pipeline::new(buffer)
//!     .grayscale()
//!     .pixelate(4, 4).unwrap()
//!     .diffuse(DiffusionKernel::FloydSteinberg)
//!     .finish();
//!
//! assert_eq!(result.width(), 32);
//! ```
//!
//! Each stage is also a free function (`pixelate`, `kmeans`, `diffuse`,
//! ...) for callers that want to work on a `&mut PixelBuffer` directly.
//!
//! # Pixel Model
//!
//! A [`PixelBuffer`] stores interleaved 8-bit channels (RGB or RGBA) in
//! raster order. Transform arithmetic happens in [`Color`], four `f32`
//! components on the byte scale `0.0..=255.0`. Keeping float math on
//! the byte scale means intermediate sums and diffused errors never
//! lose precision to premature rounding; the single lossy step is the
//! truncating write-back in [`Color::to_bytes`]. Color distance is
//! squared Euclidean over R, G and B -- alpha never participates in
//! distance, clustering, or thresholding.
//!
//! # Dithering
//!
//! Two families reduce an image to pure black and white:
//!
//! - **Error diffusion** ([`diffuse`]): each pixel snaps to the nearer
//!   extreme and the residual is pushed forward to unvisited neighbors
//!   through one of ten weight tables ([`DiffusionKernel`]), from the
//!   one-entry Simple kernel to the twelve-entry Jarvis-Judice-Ninke.
//!   Every table is fully normalized: the propagated weights sum to the
//!   whole residual, so no quantization energy is lost.
//! - **Ordered** ([`ordered_dither`]): each pixel is compared against a
//!   position-dependent threshold from a Bayer matrix that tiles the
//!   image periodically. No state crosses pixels, so the result is
//!   local and reproducible per tile.
//!
//! # Randomized Transforms
//!
//! [`kmeans`] seeds its centroids from the image's distinct colors,
//! [`mosaic`] draws region centers uniformly over the canvas, and
//! [`poisson_disk`] generates blue-noise point sets with a guaranteed
//! minimum separation. All three take `&mut impl Rng` and make no other
//! nondeterministic choices.

pub mod blue_noise;
pub mod buffer;
pub mod dither;
pub mod error;
pub mod grayscale;
pub mod mosaic;
pub mod pipeline;
pub mod quantize;
pub mod resample;


pub use blue_noise::{poisson_disk, DEFAULT_REJECTION_LIMIT};
pub use buffer::{BufferError, Color, PixelBuffer};
pub use dither::{diffuse, ordered_dither, DiffusionKernel, ThresholdMatrix};
pub use error::OpsError;
pub use grayscale::to_grayscale;
pub use mosaic::{mosaic, mosaic_with_centers};
pub use pipeline::Pipeline;
pub use quantize::kmeans;
pub use resample::pixelate;
