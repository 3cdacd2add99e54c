//! Pure Rust rasterizer with no external process dependencies.
//!
//! | Step | Crate |
//! |---|---|
//! | Parse markup, resolve fonts | `usvg` |
//! | Paint | `resvg` / `tiny-skia` |
//! | PNG | `image` (`PngEncoder`) |
//!
//! tiny-skia pixmaps hold premultiplied RGBA, so pixels are demultiplied
//! before they reach the encoder.

use super::backend::{ExportError, RasterImage, Rasterizer};
use super::cache::{FrameCache, frame_key};
use super::params::ExportOptions;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use std::sync::Mutex;
use tracing::debug;

pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
    cache: Mutex<FrameCache>,
}

impl ResvgRasterizer {
    /// Rasterizer with the host's system fonts loaded.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        Self::with_options(options)
    }

    pub fn with_options(options: usvg::Options<'static>) -> Self {
        Self {
            options,
            cache: Mutex::new(FrameCache::new()),
        }
    }

    pub fn cache_stats(&self) -> super::CacheStats {
        self.lock_cache().stats()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, FrameCache> {
        // A panic while holding the lock leaves only cached PNGs behind.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, svg: &str, options: &ExportOptions) -> Result<RasterImage, ExportError> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| ExportError::Parse(e.to_string()))?;

        let ratio = options.pixel_ratio.value() as f32;
        let size = tree.size();
        let width = (size.width() * ratio).ceil() as u32;
        let height = (size.height() * ratio).ceil() as u32;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            ExportError::Render(format!("cannot allocate {}x{} pixmap", width, height))
        })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(ratio, ratio),
            &mut pixmap.as_mut(),
        );

        let png = encode_png(&pixmap)?;
        Ok(RasterImage { width, height, png })
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, options: &ExportOptions) -> Result<RasterImage, ExportError> {
        let key = frame_key(svg, options.pixel_ratio.value());

        if options.cache_bust {
            self.lock_cache().record_bypass();
        } else if let Some(hit) = self.lock_cache().get(&key) {
            debug!(key = %&key[..12], "frame cache hit");
            return Ok(hit);
        }

        let image = self.render(svg, options)?;
        debug!(
            width = image.width,
            height = image.height,
            bytes = image.png.len(),
            "rasterized card"
        );
        self.lock_cache().insert(key, image.clone());
        Ok(image)
    }
}

fn encode_png(pixmap: &resvg::tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(out)
}
