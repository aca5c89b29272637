//! Eased-value plumbing for the interaction controller.
//!
//! Everything here follows one pattern: a target that may snap around freely
//! and a rendered value that exponentially approaches it each frame, so raw
//! pointer jitter never reaches the screen and hover exit always eases back
//! to rest.

use glam::Vec2;

use crate::constants::{PARALLAX_RANGE_PX, TILT_MAX_DEG};

/// One exponential-approach step: `current + (target - current) * factor`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

/// A 2D offset easing toward a retargetable goal.
#[derive(Clone, Copy, Debug)]
pub struct EasedVec2 {
    pub current: Vec2,
    pub target: Vec2,
    factor: f32,
}

impl EasedVec2 {
    pub fn new(factor: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            factor,
        }
    }

    pub fn step(&mut self) {
        self.current = approach_vec2(self.current, self.target, self.factor);
    }
}

/// Tilt rotation pair in degrees, eased the same way.
#[derive(Clone, Copy, Debug)]
pub struct EasedTilt {
    pub rx: f32,
    pub ry: f32,
    pub target_rx: f32,
    pub target_ry: f32,
    factor: f32,
}

impl EasedTilt {
    pub fn new(factor: f32) -> Self {
        Self {
            rx: 0.0,
            ry: 0.0,
            target_rx: 0.0,
            target_ry: 0.0,
            factor,
        }
    }

    pub fn step(&mut self) {
        self.rx = approach(self.rx, self.target_rx, self.factor);
        self.ry = approach(self.ry, self.target_ry, self.factor);
    }
}

/// Magnetic pull target: offset from the captured element center, scaled by
/// the element's strength.
#[inline]
pub fn magnetic_target(pointer_px: Vec2, center_px: Vec2, strength: f32) -> Vec2 {
    (pointer_px - center_px) * strength
}

/// Tilt targets from the pointer's fraction across the element box.
/// X rotation is inverted so the card leans away from the pointer vertically.
#[inline]
pub fn tilt_target(frac_x: f32, frac_y: f32) -> (f32, f32) {
    let ry = (frac_x - 0.5) * 2.0 * TILT_MAX_DEG;
    let rx = (frac_y - 0.5) * -2.0 * TILT_MAX_DEG;
    (rx, ry)
}

/// Parallax offset in pixels for a layer of the given sensitivity.
#[inline]
pub fn parallax_offset(smoothed_ndc: Vec2, sensitivity: f32) -> Vec2 {
    smoothed_ndc * sensitivity * PARALLAX_RANGE_PX
}

/// Background color for the given scroll progress: a convex blend of the two
/// bracketing palette stops. Progress 0 is exactly the first stop, 1 exactly
/// the last.
pub fn section_color(progress: f32, palette: &[[u8; 3]]) -> [u8; 3] {
    match palette {
        [] => [0, 0, 0],
        [only] => *only,
        _ => {
            let scaled = progress.clamp(0.0, 1.0) * palette.len() as f32;
            let idx = (scaled.floor() as usize).min(palette.len() - 2);
            let t = (scaled - idx as f32).clamp(0.0, 1.0);
            let a = palette[idx];
            let b = palette[idx + 1];
            let mut out = [0u8; 3];
            for c in 0..3 {
                out[c] = (a[c] as f32 + (b[c] as f32 - a[c] as f32) * t).round() as u8;
            }
            out
        }
    }
}
