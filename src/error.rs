use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading and saving image files.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported file extension: {path:?} (only .png is supported)")]
    UnsupportedExtension { path: PathBuf },

    #[error("unsupported PNG layout: {color_type:?} at {bit_depth:?} bit depth")]
    UnsupportedLayout {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("pixel buffer error: {0}")]
    Buffer(#[from] raster_ops::BufferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
