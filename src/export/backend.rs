//! Rasterizer trait and shared types.
//!
//! The [`Rasterizer`] trait is the seam between the controller and the
//! pixel work. The production implementation is
//! [`ResvgRasterizer`](super::resvg_backend::ResvgRasterizer); tests use the
//! recording mock below.

use super::params::ExportOptions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Save failed: {0}")]
    Save(#[from] super::sink::SinkError),
    #[error("SVG parse failed: {0}")]
    Parse(String),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// An encoded PNG plus its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Turns card markup into a PNG.
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, options: &ExportOptions) -> Result<RasterImage, ExportError>;
}
