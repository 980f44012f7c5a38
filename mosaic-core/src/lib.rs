//! Core Voronoi mosaic library.
//!
//! Generates randomly placed, randomly colored sites and rasterizes them by
//! brute-force nearest-site classification.

mod config;
mod cpu;
mod site;
mod voronoi;

pub use config::MosaicConfig;
pub use cpu::CpuBackend;
pub use site::{Site, SiteCollection};
pub use voronoi::{
    draw_sites, nearest_site, ComputeBackend, DistanceSample, VoronoiComputer, VoronoiResult,
};

/// RGBA color, 8 bits per channel
pub type Rgba = image::Rgba<u8>;

/// Error type for mosaic operations
#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No sites provided")]
    NoSites,

    #[error("Cannot have a negative number of points: {0}")]
    NegativePointCount(i64),

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
}

pub type Result<T> = std::result::Result<T, MosaicError>;
