//! Pixel storage and color math shared by every transform.

mod color;
mod error;
mod pixel_buffer;

pub use color::Color;
pub use error::BufferError;
pub use pixel_buffer::PixelBuffer;
