//! Buffer construction errors.

use thiserror::Error;

/// Errors raised while constructing a [`PixelBuffer`](super::PixelBuffer).
///
/// A buffer that fails validation is never handed out partially
/// constructed; every live buffer satisfies its size invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),

    #[error("Zero-sized image: {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Data length mismatch: got {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BufferError::UnsupportedChannels(2).to_string(),
            "Unsupported channel count: 2 (expected 3 or 4)"
        );
        assert_eq!(
            BufferError::ZeroDimension {
                width: 0,
                height: 8
            }
            .to_string(),
            "Zero-sized image: 0x8"
        );
        assert_eq!(
            BufferError::LengthMismatch {
                expected: 12,
                actual: 10
            }
            .to_string(),
            "Data length mismatch: got 10 bytes, expected 12"
        );
    }
}
