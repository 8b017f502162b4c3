//! Owned, bounds-checked pixel storage.
//!
//! [`PixelBuffer`] is the single data structure every transform in this
//! crate operates on: a contiguous byte buffer of 3- or 4-channel pixels
//! in row-major order. Each pipeline stage owns (or exclusively borrows)
//! one buffer at a time; `Clone` is always a deep copy with an
//! independent backing allocation.

use super::color::Color;
use super::error::BufferError;

/// A contiguous, row-major byte image with 3 (RGB) or 4 (RGBA) channels.
///
/// # Invariants
///
/// - `data.len() == width * height * channels`, established at
///   construction and never broken afterwards.
/// - The channel count is fixed for the buffer's lifetime.
///
/// # Panics
///
/// [`get`](Self::get) and [`set`](Self::set) treat out-of-range
/// coordinates as a programming error and panic rather than silently
/// reading or writing a wrong offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self, BufferError> {
        Self::validate(width, height, channels)?;
        let size = width as usize * height as usize * channels as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; size],
        })
    }

    /// Wrap an existing byte buffer, validating its length.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        Self::validate(width, height, channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    fn validate(width: u32, height: u32, channels: u8) -> Result<(), BufferError> {
        if channels != 3 && channels != 4 {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        Ok(())
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Whether the buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Raw bytes, row-major, `channels` bytes per pixel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of range for {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        (x as usize + self.width as usize * y as usize) * self.channels as usize
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// For 3-channel buffers, alpha reads as fully opaque.
    ///
    /// # Panics
    ///
    /// Panics when `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let offset = self.offset(x, y);
        let alpha = if self.channels == 4 {
            self.data[offset + 3]
        } else {
            0xff
        };
        Color::from_bytes(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            alpha,
        )
    }

    /// Write the pixel at `(x, y)`, truncating floats to bytes.
    ///
    /// Channels 0-2 are always written; the alpha byte only exists for
    /// 4-channel buffers and is otherwise discarded.
    ///
    /// # Panics
    ///
    /// Panics when `x >= width` or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        let [r, g, b, a] = color.to_bytes();
        self.data[offset] = r;
        self.data[offset + 1] = g;
        self.data[offset + 2] = b;
        if self.channels == 4 {
            self.data[offset + 3] = a;
        }
    }

    /// Iterate over all pixel coordinates in raster order.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}
