//! CPU rasterization: every pixel against every site.

use log::{debug, trace};

use crate::voronoi::{canvas_pixels, nearest_site, ComputeBackend};
use crate::{MosaicError, Result, Rgba, Site, VoronoiResult};

/// Brute-force, single-threaded backend
///
/// Cost is `width * height * sites.len()` distance evaluations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuBackend {
    fn compute_with_progress(
        &mut self,
        width: u32,
        height: u32,
        sites: &[Site],
        on_row: &mut dyn FnMut(u32),
    ) -> Result<VoronoiResult> {
        if sites.is_empty() {
            return Err(MosaicError::NoSites);
        }
        let invalid = || MosaicError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };
        let num_pixels = canvas_pixels(width, height).ok_or_else(invalid)?;

        debug!(
            "rasterizing {}x{} with {} sites ({} distance evaluations)",
            width,
            height,
            sites.len(),
            num_pixels as u128 * sites.len() as u128,
        );

        let mut cell_of: Vec<usize> = Vec::new();
        cell_of.try_reserve_exact(num_pixels).map_err(|_| invalid())?;
        let mut cell_areas = vec![0u64; sites.len()];

        for y in 0..height {
            for x in 0..width {
                // Non-empty list always yields a sample
                let Some(best) = nearest_site(x, y, sites) else {
                    return Err(MosaicError::NoSites);
                };
                cell_of.push(best.site);
                cell_areas[best.site] += 1;
            }
            trace!("row {} done", y);
            on_row(y);
        }

        let cell_colors: Vec<Rgba> = sites.iter().map(|s| s.color).collect();

        Ok(VoronoiResult {
            cell_of,
            cell_colors,
            cell_areas,
            width,
            height,
        })
    }
}
