//! Voronoi rasterization traits, nearest-site selection and result types.

use crate::{Result, Rgba, Site};

/// Distance from a query pixel to one site, by index into the site list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    pub site: usize,
    pub distance: f64,
}

/// Find the site nearest to pixel `(x, y)`.
///
/// Sites are scanned in order and the running best is only replaced by a
/// strictly smaller distance, so ties go to the earliest site. Returns `None`
/// for an empty site list.
pub fn nearest_site(x: u32, y: u32, sites: &[Site]) -> Option<DistanceSample> {
    let (first, rest) = sites.split_first()?;
    let mut best = DistanceSample {
        site: 0,
        distance: first.dist(x, y),
    };

    for (i, site) in rest.iter().enumerate() {
        let distance = site.dist(x, y);
        if distance < best.distance {
            best = DistanceSample { site: i + 1, distance };
        }
    }

    Some(best)
}

/// Bytes per RGBA8 pixel
const RGBA_BYTES: u64 = 4;

/// Pixel count of a `width x height` canvas, or `None` if it is empty or its
/// RGBA8 buffer would exceed `isize::MAX` bytes
pub(crate) fn canvas_pixels(width: u32, height: u32) -> Option<usize> {
    let pixels = (width as u64).checked_mul(height as u64)?;
    let bytes = pixels.checked_mul(RGBA_BYTES)?;
    if pixels == 0 || bytes > isize::MAX as u64 {
        return None;
    }
    usize::try_from(pixels).ok()
}

/// Result of rasterizing a site list
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiResult {
    /// Winning site index for each pixel (row-major order)
    pub cell_of: Vec<usize>,
    /// Color for each site
    pub cell_colors: Vec<Rgba>,
    /// Area (pixel count) for each site
    pub cell_areas: Vec<u64>,
    /// Canvas dimensions
    pub width: u32,
    pub height: u32,
}

impl VoronoiResult {
    /// Color of pixel `(x, y)`, or `None` outside the canvas
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = self.cell_of[(y as usize) * (self.width as usize) + x as usize];
        self.cell_colors.get(cell).copied()
    }

    /// Render the diagram to an RGBA8 buffer
    pub fn render(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.cell_of.len() * 4);
        for &cell in &self.cell_of {
            pixels.extend_from_slice(&self.cell_colors[cell].0);
        }
        pixels
    }

    /// Render to an `image::RgbaImage`
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        let (width, height) = (self.width, self.height);
        image::RgbaImage::from_raw(width, height, self.render()).ok_or(
            crate::MosaicError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            },
        )
    }
}

/// Trait for rasterization backends
pub trait ComputeBackend {
    /// Rasterize `sites` onto a `width x height` canvas, calling `on_row`
    /// after each finished row
    fn compute_with_progress(
        &mut self,
        width: u32,
        height: u32,
        sites: &[Site],
        on_row: &mut dyn FnMut(u32),
    ) -> Result<VoronoiResult>;

    /// Rasterize `sites` onto a `width x height` canvas
    fn compute(&mut self, width: u32, height: u32, sites: &[Site]) -> Result<VoronoiResult> {
        self.compute_with_progress(width, height, sites, &mut |_| {})
    }
}

/// High-level Voronoi computer that can use different backends
pub struct VoronoiComputer<B: ComputeBackend> {
    backend: B,
}

impl<B: ComputeBackend> VoronoiComputer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn compute(&mut self, width: u32, height: u32, sites: &[Site]) -> Result<VoronoiResult> {
        self.backend.compute(width, height, sites)
    }

    pub fn compute_with_progress(
        &mut self,
        width: u32,
        height: u32,
        sites: &[Site],
        on_row: &mut dyn FnMut(u32),
    ) -> Result<VoronoiResult> {
        self.backend.compute_with_progress(width, height, sites, on_row)
    }
}

/// Draw 3x3 black dots at each site position
pub fn draw_sites(image: &mut image::RgbaImage, sites: &[Site]) {
    let (w, h) = (image.width() as i64, image.height() as i64);
    for site in sites {
        let (cx, cy) = (site.x as i64, site.y as i64);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && px < w && py >= 0 && py < h {
                    image.put_pixel(px as u32, py as u32, image::Rgba([0, 0, 0, 255]));
                }
            }
        }
    }
}
