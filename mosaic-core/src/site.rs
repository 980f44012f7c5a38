//! Site types and random site generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Rgba;

/// Exclusive upper bound for each generated color channel
const CHANNEL_BOUND: u8 = 255;

/// A Voronoi site: integer position and the color of its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub x: u32,
    pub y: u32,
    pub color: Rgba,
}

impl Site {
    pub fn new(x: u32, y: u32, color: Rgba) -> Self {
        Self { x, y, color }
    }

    /// Euclidean distance to a pixel coordinate
    pub fn dist(&self, x: u32, y: u32) -> f64 {
        let dx = self.x as f64 - x as f64;
        let dy = self.y as f64 - y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Draw one site from `rng`: x, y, then R, G, B
    fn random<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> Self {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let color = image::Rgba([
            rng.gen_range(0..CHANNEL_BOUND),
            rng.gen_range(0..CHANNEL_BOUND),
            rng.gen_range(0..CHANNEL_BOUND),
            u8::MAX,
        ]);
        Self { x, y, color }
    }
}

/// Sites in generation order
///
/// Order matters: the rasterizer resolves equidistant sites in favour of the
/// one generated first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteCollection {
    pub sites: Vec<Site>,
}

impl SiteCollection {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    /// Generate `count` sites uniformly inside `width x height` using `rng`.
    ///
    /// Duplicate positions are kept. `width` and `height` must be non-zero;
    /// `MosaicConfig` guarantees this for user input.
    pub fn random<R: Rng + ?Sized>(count: usize, width: u32, height: u32, rng: &mut R) -> Self {
        let sites = (0..count)
            .map(|_| Site::random(rng, width, height))
            .collect();
        Self::new(sites)
    }

    /// Generate sites from a ChaCha8 stream seeded with `seed`
    pub fn seeded(count: usize, width: u32, height: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(count, width, height, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn as_slice(&self) -> &[Site] {
        &self.sites
    }
}
