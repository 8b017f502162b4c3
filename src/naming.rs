//! Output path derivation.
//!
//! Every transform writes next to nothing it read: results land in a
//! generated-output directory under a name derived from the input stem
//! plus a suffix encoding the transform and its parameters, so repeated
//! runs with different parameters never clobber each other.

use raster_ops::DiffusionKernel;
use std::path::{Path, PathBuf};

/// Default directory for generated images.
pub const GENERATED_DIR: &str = "assets/generated";

/// The transform a filename suffix encodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputTag {
    Grayscale,
    Pixelate { tile_w: u32, tile_h: u32 },
    KMeans { k: u32 },
    Dither { kernel: DiffusionKernel },
    Bayer { tile_w: u32, tile_h: u32 },
    Mosaic { regions: u32 },
}

impl OutputTag {
    /// Filename suffix for this transform.
    pub fn suffix(&self) -> String {
        match self {
            OutputTag::Grayscale => "_grayscale".to_string(),
            OutputTag::Pixelate { tile_w, tile_h } => format!("_{tile_w}x{tile_h}px"),
            OutputTag::KMeans { k } => format!("_k_means_{k}"),
            OutputTag::Dither { kernel } => format!("_dither_{}", kernel.name()),
            OutputTag::Bayer { tile_w, tile_h } => format!("_dither_bayer_{tile_w}x{tile_h}"),
            OutputTag::Mosaic { regions } => format!("_mosaic_{regions}"),
        }
    }
}

/// Derive the output path for `input` transformed as `tag`.
///
/// The input's stem and extension are kept; only the directory and the
/// suffix change. Inputs without a stem or extension fall back to
/// `output` and `png`.
pub fn output_path(out_dir: &Path, input: &Path, tag: &OutputTag) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    out_dir.join(format!("{stem}{}.{ext}", tag.suffix()))
}
