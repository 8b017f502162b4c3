//! Voronoi mosaic coloring.
//!
//! A set of center points partitions the canvas into Voronoi regions;
//! every region is flattened to the mean color of its member pixels.
//! Centers come from a uniform random draw over the canvas by default,
//! or from an externally supplied point set (for example the
//! Poisson-disk sampler in [`crate::blue_noise`]).

use crate::buffer::{Color, PixelBuffer};
use crate::error::OpsError;
use rand::Rng;

/// One Voronoi region: its seed point, a running color sum, and the
/// coordinates of its member pixels. Lives for a single mosaic run.
#[derive(Debug)]
struct Region {
    center: (f32, f32),
    color_sum: Color,
    members: Vec<(u32, u32)>,
}

impl Region {
    fn new(center: (f32, f32)) -> Self {
        Self {
            center,
            color_sum: Color::default(),
            members: Vec::new(),
        }
    }

    #[inline]
    fn distance_squared(&self, x: u32, y: u32) -> f32 {
        let dx = x as f32 - self.center.0;
        let dy = y as f32 - self.center.1;
        dx * dx + dy * dy
    }
}

/// Mosaic with uniformly random centers.
///
/// The RNG is the only source of randomness; injecting a seeded RNG
/// makes the run deterministic.
pub fn mosaic(buffer: &mut PixelBuffer, regions: u32, rng: &mut impl Rng) -> Result<(), OpsError> {
    if regions == 0 {
        return Err(OpsError::InvalidRegionCount(regions));
    }
    let centers: Vec<(f32, f32)> = (0..regions)
        .map(|_| {
            (
                rng.gen_range(0.0..buffer.width() as f32),
                rng.gen_range(0.0..buffer.height() as f32),
            )
        })
        .collect();
    mosaic_with_centers(buffer, &centers)
}

/// Mosaic with externally supplied centers in image-space coordinates.
pub fn mosaic_with_centers(buffer: &mut PixelBuffer, centers: &[(f32, f32)]) -> Result<(), OpsError> {
    if centers.is_empty() {
        return Err(OpsError::InvalidRegionCount(0));
    }

    let mut regions: Vec<Region> = centers.iter().map(|&c| Region::new(c)).collect();

    // Assignment scan: nearest center wins, ties go to the lowest index.
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let mut nearest = 0;
            let mut nearest_distance = f32::INFINITY;
            for (i, region) in regions.iter().enumerate() {
                let distance = region.distance_squared(x, y);
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = i;
                }
            }
            let region = &mut regions[nearest];
            region.color_sum += buffer.get(x, y);
            region.members.push((x, y));
        }
    }

    // Flatten each region to its mean color.
    for region in &regions {
        // Every pixel lands in some region, but a center can still end
        // up with no members; skip instead of dividing by zero.
        if region.members.is_empty() {
            continue;
        }
        let mean = region.color_sum * (1.0 / region.members.len() as f32);
        for &(x, y) in &region.members {
            buffer.set(x, y, mean);
        }
    }

    Ok(())
}
