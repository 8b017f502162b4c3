//! PNG decode/encode for the CLI.
//!
//! The codec boundary is deliberately strict: only `.png` files are
//! accepted, the extension is checked before anything touches the
//! filesystem, and a decode either yields a fully constructed
//! [`PixelBuffer`] or an error -- never a partial buffer.

use crate::error::IoError;
use raster_ops::PixelBuffer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Decode a PNG file into a pixel buffer.
///
/// Palette, low-bit-depth and 16-bit images are normalized to 8-bit
/// channels by the decoder; grayscale images are expanded to RGB so
/// downstream transforms always see 3 or 4 channels.
pub fn decode(path: &Path) -> Result<PixelBuffer, IoError> {
    if !is_png(path) {
        return Err(IoError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let mut decoder = png::Decoder::new(File::open(path)?);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut data = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data)?;
    data.truncate(info.buffer_size());

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedLayout {
            color_type,
            bit_depth,
        });
    }

    let buffer = match color_type {
        png::ColorType::Rgb => PixelBuffer::from_raw(info.width, info.height, 3, data)?,
        png::ColorType::Rgba => PixelBuffer::from_raw(info.width, info.height, 4, data)?,
        png::ColorType::Grayscale => {
            let rgb: Vec<u8> = data.iter().flat_map(|&v| [v, v, v]).collect();
            PixelBuffer::from_raw(info.width, info.height, 3, rgb)?
        }
        png::ColorType::GrayscaleAlpha => {
            let rgba: Vec<u8> = data
                .chunks_exact(2)
                .flat_map(|pair| [pair[0], pair[0], pair[0], pair[1]])
                .collect();
            PixelBuffer::from_raw(info.width, info.height, 4, rgba)?
        }
        other => {
            return Err(IoError::UnsupportedLayout {
                color_type: other,
                bit_depth,
            })
        }
    };

    Ok(buffer)
}

/// Encode a pixel buffer to a PNG file, creating parent directories.
///
/// The extension is validated before any directory or file is created.
pub fn encode(path: &Path, buffer: &PixelBuffer) -> Result<(), IoError> {
    if !is_png(path) {
        return Err(IoError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), buffer.width(), buffer.height());
    encoder.set_color(if buffer.channels() == 4 {
        png::ColorType::Rgba
    } else {
        png::ColorType::Rgb
    });
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(buffer.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_ops::Color;

    fn sample(channels: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(3, 2, channels).unwrap();
        for (x, y) in buf.coordinates().collect::<Vec<_>>() {
            buf.set(
                x,
                y,
                Color::from_bytes((x * 80) as u8, (y * 120) as u8, 200, 100),
            );
        }
        buf
    }

    #[test]
    fn test_rejects_non_png_extension_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let result = encode(&path, &sample(3));
        assert!(matches!(result, Err(IoError::UnsupportedExtension { .. })));
        assert!(!path.exists(), "no file may be created for a rejected path");
    }

    #[test]
    fn test_rejects_non_png_extension_on_decode() {
        let result = decode(Path::new("missing.bmp"));
        assert!(matches!(result, Err(IoError::UnsupportedExtension { .. })));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = decode(Path::new("does_not_exist.png"));
        assert!(matches!(result, Err(IoError::Io(_))));
    }

    #[test]
    fn test_rgb_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let original = sample(3);
        encode(&path, &original).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_rgba_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let original = sample(4);
        encode(&path, &original).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.png");
        encode(&path, &sample(3)).unwrap();
        assert!(path.exists());
    }
}
