//! Export pipeline: card SVG to a downloadable PNG, pure Rust.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Parse** | `usvg::Tree::from_str` (system fonts loaded once) |
//! | **Render** | `resvg::render` into a `tiny_skia::Pixmap` scaled by the pixel ratio |
//! | **Encode** | `image::codecs::png::PngEncoder` (lossless) |
//! | **Frame cache** | SHA-256 of markup + ratio → previously rendered PNG |
//! | **Save** | [`DownloadSink`]: a directory on disk for the CLI |
//!
//! The module is split into:
//! - **Parameters**: [`ExportOptions`] and [`PixelRatio`]
//! - **Backend**: [`Rasterizer`] trait + [`ResvgRasterizer`]
//! - **Cache**: [`FrameCache`], bypassed when `cache_bust` is set
//! - **Sink**: [`DownloadSink`] + [`DirectorySink`]

pub mod backend;
mod cache;
mod params;
pub mod resvg_backend;
pub mod sink;

pub use backend::{ExportError, RasterImage, Rasterizer};
pub use cache::{CacheStats, FrameCache, frame_key};
pub use params::{ExportOptions, PixelRatio};
pub use resvg_backend::ResvgRasterizer;
pub use sink::{DirectorySink, DownloadSink, SinkError};
