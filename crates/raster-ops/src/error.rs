//! Parameter validation errors for the transform functions.
//!
//! Every transform validates its inputs before touching pixel data, so
//! a failed call leaves the buffer exactly as it was.

use crate::buffer::BufferError;
use thiserror::Error;

/// Errors raised by the transform entry points.
#[derive(Debug, Error, PartialEq)]
pub enum OpsError {
    #[error("Invalid tile size: {width}x{height} (both dimensions must be positive)")]
    InvalidTileSize { width: u32, height: u32 },

    #[error("Invalid cluster count: {0} (must be positive)")]
    InvalidClusterCount(u32),

    #[error("Invalid region count: {0} (must be positive)")]
    InvalidRegionCount(u32),

    #[error("Invalid minimum separation: {0} (must be positive)")]
    InvalidSeparation(f32),

    #[error("Invalid rejection limit: {0} (must be positive)")]
    InvalidRejectionLimit(u32),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
