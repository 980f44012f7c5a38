//! Validation of raw user-supplied canvas parameters.

use crate::voronoi::canvas_pixels;
use crate::{MosaicError, Result};

/// Validated run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicConfig {
    pub points: usize,
    pub width: u32,
    pub height: u32,
}

impl MosaicConfig {
    pub const DEFAULT_POINTS: i64 = 5;
    pub const DEFAULT_WIDTH: i64 = 640;
    pub const DEFAULT_HEIGHT: i64 = 480;

    /// Check raw values and narrow them to their working types.
    ///
    /// Zero points is accepted here; rasterizing an empty site list fails
    /// later with `MosaicError::NoSites`.
    pub fn new(points: i64, width: i64, height: i64) -> Result<Self> {
        if points < 0 {
            return Err(MosaicError::NegativePointCount(points));
        }
        let invalid = MosaicError::InvalidDimensions { width, height };

        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(invalid);
        };
        if canvas_pixels(w, h).is_none() {
            return Err(invalid);
        }
        let points = usize::try_from(points).map_err(|_| MosaicError::NegativePointCount(points))?;

        Ok(Self { points, width: w, height: h })
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            points: Self::DEFAULT_POINTS as usize,
            width: Self::DEFAULT_WIDTH as u32,
            height: Self::DEFAULT_HEIGHT as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MosaicConfig::new(
            MosaicConfig::DEFAULT_POINTS,
            MosaicConfig::DEFAULT_WIDTH,
            MosaicConfig::DEFAULT_HEIGHT,
        )
        .unwrap();
        assert_eq!(config, MosaicConfig::default());
        assert_eq!((config.points, config.width, config.height), (5, 640, 480));
    }

    #[test]
    fn test_negative_points_rejected() {
        let err = MosaicConfig::new(-1, 640, 480).unwrap_err();
        assert!(matches!(err, MosaicError::NegativePointCount(-1)));
        assert_eq!(err.to_string(), "Cannot have a negative number of points: -1");
    }

    #[test]
    fn test_zero_points_accepted() {
        assert_eq!(MosaicConfig::new(0, 10, 10).unwrap().points, 0);
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        for (w, h) in [(0, 480), (640, 0), (-5, 480), (640, -1)] {
            let err = MosaicConfig::new(5, w, h).unwrap_err();
            assert!(
                matches!(err, MosaicError::InvalidDimensions { width, height } if width == w && height == h),
                "{}x{} should be rejected",
                w,
                h,
            );
        }
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let too_wide = u32::MAX as i64 + 1;
        assert!(MosaicConfig::new(5, too_wide, 1).is_err());

        let max = u32::MAX as i64;
        let err = MosaicConfig::new(5, max, max).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidDimensions { width, height } if width == max && height == max
        ));
    }
}
