//! Parameter types for export operations.
//!
//! These describe *what* to produce. The [`backend`](super::backend) decides
//! how. Keeping them apart lets tests swap in a mock rasterizer without
//! touching the controller.

use crate::config::{ExportConfig, MAX_PIXEL_RATIO};

/// Output pixels per card unit (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRatio(u32);

impl PixelRatio {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, MAX_PIXEL_RATIO))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Scale logical dimensions to output pixels.
    pub fn scale(self, width: u32, height: u32) -> (u32, u32) {
        (width * self.0, height * self.0)
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self(3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub pixel_ratio: PixelRatio,
    /// Ignore any previously captured frame for the same markup.
    pub cache_bust: bool,
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            pixel_ratio: PixelRatio::new(config.pixel_ratio),
            cache_bust: config.cache_bust,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: PixelRatio::default(),
            cache_bust: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_clamps_to_valid_range() {
        assert_eq!(PixelRatio::new(0).value(), 1);
        assert_eq!(PixelRatio::new(3).value(), 3);
        assert_eq!(PixelRatio::new(50).value(), MAX_PIXEL_RATIO);
    }

    #[test]
    fn default_is_3x_with_cache_bust() {
        let opts = ExportOptions::default();
        assert_eq!(opts.pixel_ratio.value(), 3);
        assert!(opts.cache_bust);
        assert_eq!(opts, ExportOptions::from_config(&ExportConfig::default()));
    }

    #[test]
    fn scale_multiplies_both_axes() {
        assert_eq!(PixelRatio::new(3).scale(400, 500), (1200, 1500));
    }
}
