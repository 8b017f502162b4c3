use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixim::naming::{self, OutputTag};
use pixim::{ascii, io};
use raster_ops::{
    diffuse, kmeans, mosaic, mosaic_with_centers, ordered_dither, pixelate, poisson_disk,
    to_grayscale, DiffusionKernel, PixelBuffer, DEFAULT_REJECTION_LIMIT,
};

#[derive(Parser)]
#[command(name = "pixim")]
#[command(about = "Pixel-level image transforms: pixelate, quantize, dither, mosaic, ascii")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for generated images
    #[arg(long, global = true, default_value = naming::GENERATED_DIR)]
    out_dir: PathBuf,

    /// Seed for randomized transforms (reproducible runs)
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to grayscale (BT.601 luminance)
    Grayscale {
        /// Input PNG file
        input: PathBuf,
    },
    /// Box-average pixelation
    Pixelate {
        /// Input PNG file
        input: PathBuf,

        /// Tile width in pixels
        #[arg(short = 'W', long, default_value_t = 8)]
        tile_width: u32,

        /// Tile height in pixels
        #[arg(short = 'H', long, default_value_t = 8)]
        tile_height: u32,
    },
    /// K-means color quantization
    Quantize {
        /// Input PNG file
        input: PathBuf,

        /// Number of clusters
        #[arg(short, long, default_value_t = 8)]
        k: u32,

        /// Keep each pixel's original alpha
        #[arg(long)]
        maintain_alpha: bool,
    },
    /// Black-and-white error diffusion dithering
    Dither {
        /// Input PNG file
        input: PathBuf,

        /// Diffusion kernel
        #[arg(short, long, default_value = "floyd_steinberg", value_parser = parse_kernel)]
        kernel: DiffusionKernel,
    },
    /// Ordered (Bayer) dithering
    Bayer {
        /// Input PNG file
        input: PathBuf,

        /// Threshold tile width
        #[arg(short = 'W', long, default_value_t = 4)]
        tile_width: u32,

        /// Threshold tile height
        #[arg(short = 'H', long, default_value_t = 4)]
        tile_height: u32,
    },
    /// Voronoi mosaic
    Mosaic {
        /// Input PNG file
        input: PathBuf,

        /// Number of regions (uniform random centers)
        #[arg(short, long, required_unless_present = "blue_noise")]
        regions: Option<u32>,

        /// Seed centers with Poisson-disk (blue-noise) sampling
        #[arg(long)]
        blue_noise: bool,

        /// Minimum center separation in pixels (blue-noise mode)
        #[arg(long, default_value_t = 16.0)]
        min_separation: f32,
    },
    /// Render as ASCII art on stdout
    Ascii {
        /// Input PNG file
        input: PathBuf,

        /// Columns of pixels per character (rows use twice this)
        #[arg(short, long, default_value_t = 4)]
        resolution: u32,
    },
}

fn parse_kernel(s: &str) -> Result<DiffusionKernel, String> {
    DiffusionKernel::ALL
        .into_iter()
        .find(|k| k.name() == s)
        .ok_or_else(|| {
            let names: Vec<&str> = DiffusionKernel::ALL.into_iter().map(|k| k.name()).collect();
            format!("unknown kernel {s:?}, expected one of: {}", names.join(", "))
        })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Commands::Grayscale { input } => {
            let mut buffer = io::decode(&input)?;
            to_grayscale(&mut buffer);
            write_output(&cli.out_dir, &input, &OutputTag::Grayscale, &buffer)
        }
        Commands::Pixelate {
            input,
            tile_width,
            tile_height,
        } => {
            let mut buffer = io::decode(&input)?;
            pixelate(&mut buffer, tile_width, tile_height)?;
            let tag = OutputTag::Pixelate {
                tile_w: tile_width,
                tile_h: tile_height,
            };
            write_output(&cli.out_dir, &input, &tag, &buffer)
        }
        Commands::Quantize {
            input,
            k,
            maintain_alpha,
        } => {
            let mut buffer = io::decode(&input)?;
            kmeans(&mut buffer, k, maintain_alpha, &mut rng)?;
            write_output(&cli.out_dir, &input, &OutputTag::KMeans { k }, &buffer)
        }
        Commands::Dither { input, kernel } => {
            let mut buffer = io::decode(&input)?;
            diffuse(&mut buffer, kernel);
            write_output(&cli.out_dir, &input, &OutputTag::Dither { kernel }, &buffer)
        }
        Commands::Bayer {
            input,
            tile_width,
            tile_height,
        } => {
            let mut buffer = io::decode(&input)?;
            ordered_dither(&mut buffer, tile_width, tile_height)?;
            let tag = OutputTag::Bayer {
                tile_w: tile_width,
                tile_h: tile_height,
            };
            write_output(&cli.out_dir, &input, &tag, &buffer)
        }
        Commands::Mosaic {
            input,
            regions,
            blue_noise,
            min_separation,
        } => {
            let mut buffer = io::decode(&input)?;
            let region_count = if blue_noise {
                let centers = poisson_disk(
                    buffer.width(),
                    buffer.height(),
                    min_separation,
                    DEFAULT_REJECTION_LIMIT,
                    &mut rng,
                )?;
                tracing::info!(
                    centers = centers.len(),
                    min_separation,
                    "blue-noise centers sampled"
                );
                mosaic_with_centers(&mut buffer, &centers)?;
                centers.len() as u32
            } else {
                // clap guarantees `regions` when --blue-noise is absent.
                let n = regions.unwrap_or_default();
                mosaic(&mut buffer, n, &mut rng)?;
                n
            };
            let tag = OutputTag::Mosaic {
                regions: region_count,
            };
            write_output(&cli.out_dir, &input, &tag, &buffer)
        }
        Commands::Ascii { input, resolution } => {
            let buffer = io::decode(&input)?;
            let mut pixelated = buffer;
            pixelate(&mut pixelated, resolution.max(1), resolution.max(1) * 2)?;
            print!("{}", ascii::render(&pixelated, resolution.max(1)));
            Ok(())
        }
    }
}

fn write_output(
    out_dir: &std::path::Path,
    input: &std::path::Path,
    tag: &OutputTag,
    buffer: &PixelBuffer,
) -> anyhow::Result<()> {
    let path = naming::output_path(out_dir, input, tag);
    io::encode(&path, buffer)?;
    tracing::info!(
        width = buffer.width(),
        height = buffer.height(),
        "transform complete"
    );
    println!("Wrote {}", path.display());
    Ok(())
}
