//! In-memory frame cache for rendered cards.
//!
//! Rasterizing a 3x card is the slowest step of a download. When the same
//! markup is exported again at the same pixel ratio the previous PNG can be
//! reused. Keys are content-addressed:
//! SHA-256 over the pixel ratio and the SVG markup.
//!
//! Exports with `cache_bust` set skip the lookup (and still refresh the
//! entry), mirroring a capture that must not reuse a stale frame.

use super::backend::RasterImage;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Frames kept by [`FrameCache::new`]. A full-size 3x card is a few hundred
/// kilobytes of PNG.
pub const DEFAULT_CAPACITY: usize = 8;

/// Cache key for `svg` rendered at `pixel_ratio`.
pub fn frame_key(svg: &str, pixel_ratio: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"frame\0");
    hasher.update(pixel_ratio.to_le_bytes());
    hasher.update(svg.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Bounded cache. When full, the oldest inserted frame is evicted.
#[derive(Debug)]
pub struct FrameCache {
    entries: HashMap<String, RasterImage>,
    order: VecDeque<String>,
    capacity: usize,
    stats: CacheStats,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` frames (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<RasterImage> {
        let hit = self.entries.get(key).cloned();
        match hit {
            Some(_) => self.stats.hits += 1,
            None => self.stats.misses += 1,
        }
        hit
    }

    pub fn insert(&mut self, key: String, image: RasterImage) {
        if self.entries.insert(key.clone(), image).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Record a render that bypassed the lookup.
    pub fn record_bypass(&mut self) {
        self.stats.bypassed += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
    pub bypassed: u32,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cached, {} rendered, {} cache-busted",
            self.hits, self.misses, self.bypassed
        )
    }
}
