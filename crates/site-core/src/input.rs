//! Shared pointer/scroll state.
//!
//! One `InputState` is constructed at startup and handed to every controller.
//! Event handlers write the raw readings; exactly one controller calls
//! [`InputState::step`] per frame so that all consumers of the smoothed
//! snapshot see the same values within a frame.

use glam::Vec2;

use crate::constants::{
    POINTER_SMOOTHING, POINTER_SPEED_BLEND, POINTER_SPEED_DECAY, POINTER_SPEED_GAIN,
};

/// Latest event-reported pointer position plus the per-frame smoothed reading.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
    /// Last reported position in client pixels.
    pub raw_px: Vec2,
    /// Exponentially smoothed position, normalized to [-1, 1] (y grows down).
    pub smoothed: Vec2,
    /// Activity estimate in [0, 1]; rises with motion, decays at rest.
    pub speed: f32,
    viewport: Vec2,
    last_ndc: Vec2,
}

impl PointerState {
    fn new(viewport_w: f32, viewport_h: f32) -> Self {
        let viewport = Vec2::new(viewport_w.max(1.0), viewport_h.max(1.0));
        Self {
            // Centered default so a frame before any pointer event is harmless
            raw_px: viewport * 0.5,
            smoothed: Vec2::ZERO,
            speed: 0.0,
            viewport,
            last_ndc: Vec2::ZERO,
        }
    }

    /// Raw position normalized to [-1, 1] on both axes, y growing downward.
    #[inline]
    pub fn raw_ndc(&self) -> Vec2 {
        Vec2::new(
            (self.raw_px.x / self.viewport.x) * 2.0 - 1.0,
            (self.raw_px.y / self.viewport.y) * 2.0 - 1.0,
        )
    }

    /// Smoothed position with y flipped upward, for world-space consumers.
    #[inline]
    pub fn smoothed_y_up(&self) -> Vec2 {
        Vec2::new(self.smoothed.x, -self.smoothed.y)
    }

    fn step(&mut self) {
        // Decay first: the value consumers saw last frame was pre-decay
        self.speed *= POINTER_SPEED_DECAY;
        let ndc = self.raw_ndc();
        let delta = (ndc - self.last_ndc).length();
        self.speed += (delta * POINTER_SPEED_GAIN - self.speed) * POINTER_SPEED_BLEND;
        self.speed = self.speed.min(1.0);
        self.last_ndc = ndc;
        self.smoothed += (ndc - self.smoothed) * POINTER_SMOOTHING;
    }
}

/// Scroll position and the derived page progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    /// Current scrollY in pixels.
    pub y: f32,
    /// Maximum scrollable distance (document height minus viewport height).
    pub max: f32,
}

impl ScrollState {
    /// Page progress in [0, 1]; 0 when the page does not scroll at all.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.max > 0.0 {
            (self.y / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InputState {
    pub pointer: PointerState,
    pub scroll: ScrollState,
}

impl InputState {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            pointer: PointerState::new(viewport_w, viewport_h),
            scroll: ScrollState::default(),
        }
    }

    /// Record a pointer event in client pixels.
    pub fn set_pointer_px(&mut self, x: f32, y: f32) {
        self.pointer.raw_px = Vec2::new(x, y);
    }

    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.pointer.viewport = Vec2::new(w.max(1.0), h.max(1.0));
    }

    pub fn set_scroll(&mut self, y: f32, max: f32) {
        self.scroll.y = y;
        self.scroll.max = max.max(0.0);
    }

    /// Advance the smoothed snapshot by one frame. Call once per frame.
    pub fn step(&mut self) {
        self.pointer.step();
    }
}
