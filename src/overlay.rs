//! Celebratory particle overlays (floating lanterns, twinkling stars).
//!
//! An overlay is inert until activated. Activation synthesizes a fresh batch
//! of particles from the injected random source and schedules the batch's
//! expiry. Activating again while a batch is live replaces it and restarts
//! the expiry window. Overlays never touch card state.
//!
//! Particle ranges:
//!
//! | particle | field | range |
//! |---|---|---|
//! | lantern | `x` (% of width) | `[0, 100)` |
//! | lantern | `delay` (s) | `[0, 2)` |
//! | lantern | `duration` (s) | `[4, 7)` |
//! | lantern | `size` (px) | `[20, 50)` |
//! | star | `x`, `y` (%) | `[0, 100)` |
//! | star | `delay` (s) | `[0, 2)` |

use crate::random::RandomSource;
use crate::timers::{TimerId, Timers};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Lanterns,
    Stars,
}

/// A particle type that can be synthesized from a random source.
pub trait Particle: Sized {
    const KIND: OverlayKind;

    fn synthesize(id: usize, rng: &mut dyn RandomSource) -> Self;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lantern {
    pub id: usize,
    pub x: f64,
    pub delay: f64,
    pub duration: f64,
    pub size: f64,
}

impl Particle for Lantern {
    const KIND: OverlayKind = OverlayKind::Lanterns;

    fn synthesize(id: usize, rng: &mut dyn RandomSource) -> Self {
        Self {
            id,
            x: rng.in_range(0.0, 100.0),
            delay: rng.in_range(0.0, 2.0),
            duration: rng.in_range(4.0, 3.0),
            size: rng.in_range(20.0, 30.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub delay: f64,
}

impl Particle for Star {
    const KIND: OverlayKind = OverlayKind::Stars;

    fn synthesize(id: usize, rng: &mut dyn RandomSource) -> Self {
        Self {
            id,
            x: rng.in_range(0.0, 100.0),
            y: rng.in_range(0.0, 100.0),
            delay: rng.in_range(0.0, 2.0),
        }
    }
}

/// Timer payload: the batch with this generation has reached its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchExpired {
    pub kind: OverlayKind,
    generation: u64,
}

#[derive(Debug)]
pub struct Overlay<P> {
    count: usize,
    lifetime: Duration,
    batch: Vec<P>,
    generation: u64,
    timer: Option<TimerId>,
}

impl<P: Particle> Overlay<P> {
    pub fn new(count: usize, lifetime: Duration) -> Self {
        Self {
            count,
            lifetime,
            batch: Vec::new(),
            generation: 0,
            timer: None,
        }
    }

    /// Start (or restart) the effect with a fresh batch.
    pub fn activate<T: From<BatchExpired>>(
        &mut self,
        rng: &mut dyn RandomSource,
        timers: &mut Timers<T>,
    ) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
        }
        self.generation += 1;
        self.batch = (0..self.count).map(|id| P::synthesize(id, rng)).collect();
        let event = BatchExpired {
            kind: P::KIND,
            generation: self.generation,
        };
        self.timer = Some(timers.schedule(self.lifetime, event.into()));
        debug!(
            kind = ?P::KIND,
            particles = self.batch.len(),
            generation = self.generation,
            "overlay activated"
        );
    }

    /// Handle a fired expiry. Expiries from replaced batches are ignored.
    pub fn expire(&mut self, event: BatchExpired) -> bool {
        if event.kind != P::KIND || event.generation != self.generation || self.batch.is_empty()
        {
            return false;
        }
        self.batch.clear();
        self.timer = None;
        true
    }

    /// Drop the batch and cancel its expiry.
    pub fn dispose<T>(&mut self, timers: &mut Timers<T>) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
        }
        self.batch.clear();
    }

    pub fn particles(&self) -> &[P] {
        &self.batch
    }

    pub fn is_active(&self) -> bool {
        !self.batch.is_empty()
    }
}
