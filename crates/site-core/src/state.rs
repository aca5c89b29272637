//! Visual-side state types shared with the web frontend.
//!
//! These types avoid platform-specific APIs so they can be exercised in
//! native tests; the web frontend consumes them to build camera matrices.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FOV_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The fixed backdrop camera: straight down the z axis, wide enough to
    /// frame the whole helix.
    pub fn backdrop(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Resize updates only the aspect ratio; nothing else about the camera or
    /// the particle population changes.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-3);
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
