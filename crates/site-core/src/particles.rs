//! Double-helix particle field.
//!
//! A fixed population of points is generated once (two interleaved helix
//! strands plus an ambient scatter band) and only displaced afterwards: decay
//! toward the original position, pointer-proximity repulsion, idle jitter and
//! an exponentially decaying click burst.

use glam::{EulerRot, Mat4, Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub original: Vec3,
    pub current: Vec3,
    /// Fixed random direction, only consulted while a burst is live.
    pub burst_dir: Vec3,
    pub color: Vec3,
    pub size: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    rot_y: f32,
    rot_x: f32,
    rot_z: f32,
    offset_y: f32,
    burst: f32,
}

/// Population heuristic: fewer particles on dense displays and narrow viewports.
#[inline]
pub fn particle_count_for(device_pixel_ratio: f64, viewport_w: f64) -> usize {
    if device_pixel_ratio > REDUCED_DPR_THRESHOLD || viewport_w < REDUCED_WIDTH_THRESHOLD {
        PARTICLES_REDUCED
    } else {
        PARTICLES_FULL
    }
}

impl ParticleField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(count);
        let strand = (count as f32 * STRAND_FRACTION).floor() as usize;

        for i in 0..count {
            let original = if i < strand {
                helix_point(i, count, 0.0, &mut rng)
            } else if i < strand * 2 {
                // Second strand, half a turn out of phase so the two interleave
                let idx = i - strand;
                helix_point(idx, strand.max(1), std::f32::consts::PI, &mut rng)
            } else {
                Vec3::new(
                    centered(&mut rng) * SCATTER_SPAN[0],
                    centered(&mut rng) * SCATTER_SPAN[1],
                    centered(&mut rng) * SCATTER_SPAN[2],
                )
            };

            let burst_dir = Vec3::new(
                centered(&mut rng) * 2.0,
                centered(&mut rng) * 2.0,
                centered(&mut rng) * 2.0,
            );

            let mix: f32 = rng.gen();
            let color = if mix < 0.4 {
                Vec3::from(COLOR_PRIMARY)
            } else if mix < 0.7 {
                Vec3::from(COLOR_ACCENT)
            } else {
                Vec3::from(COLOR_LIGHT)
            };

            particles.push(Particle {
                original,
                current: original,
                burst_dir,
                color,
                size: rng.gen::<f32>() * PARTICLE_SIZE_SPAN + PARTICLE_SIZE_MIN,
            });
        }

        Self {
            particles,
            rot_y: 0.0,
            rot_x: 0.0,
            rot_z: 0.0,
            offset_y: 0.0,
            burst: 0.0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Kick off a click burst at full intensity.
    pub fn trigger_burst(&mut self) {
        self.burst = 1.0;
    }

    #[inline]
    pub fn burst_intensity(&self) -> f32 {
        self.burst
    }

    /// Accumulated yaw of the whole field, in radians.
    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rot_y
    }

    /// Field transform: accumulated spin and wobble plus the scroll drift.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_euler(EulerRot::XYZ, self.rot_x, self.rot_y, self.rot_z)
    }

    /// Recompute every particle position for this frame.
    ///
    /// `pointer` is the smoothed pointer in [-1, 1] with y up; `speed` is the
    /// shared activity estimate in [0, 1].
    pub fn update(&mut self, elapsed: f32, dt: f32, pointer: Vec2, speed: f32, scroll_y: f32) {
        // Spin accumulates so it never runs backwards; activity speeds it up
        self.rot_y += dt * (ROT_BASE_RATE + speed * ROT_SPEED_GAIN);
        self.rot_x = (elapsed * WOBBLE_RATE).sin() * WOBBLE_AMP + pointer.y * POINTER_TILT_X;
        self.rot_z = pointer.x * POINTER_TILT_Z;
        self.offset_y = -scroll_y * SCROLL_FIELD_DRIFT;

        let projected = pointer * POINTER_FIELD_SCALE;
        let burst_live = self.burst > BURST_CUTOFF;

        for (i, p) in self.particles.iter_mut().enumerate() {
            let o = p.original;
            let dx = o.x - projected.x;
            let dy = o.y - projected.y;
            let dist = (dx * dx + dy * dy).sqrt();

            let mut pos = if dist < PROXIMITY_RADIUS {
                // Push directly away from the pointer, stronger when closer
                let force =
                    (1.0 - dist / PROXIMITY_RADIUS) * (REPULSION_BASE + speed * REPULSION_SPEED_GAIN);
                let angle = dy.atan2(dx);
                Vec3::new(
                    o.x + angle.cos() * force,
                    o.y + angle.sin() * force,
                    o.z + (angle + elapsed).sin() * force * REPULSION_Z_WIGGLE,
                )
            } else {
                let phase = i as f32;
                Vec3::new(
                    o.x + (elapsed * 0.8 + phase * 0.01).sin() * JITTER_AMP[0],
                    o.y + (elapsed * 0.6 + phase * 0.01).cos() * JITTER_AMP[1],
                    o.z + (elapsed * 0.4 + phase * 0.02).sin() * JITTER_AMP[2],
                )
            };

            if burst_live {
                pos += p.burst_dir * (self.burst * BURST_AMPLITUDE);
            }
            p.current = pos;
        }

        self.burst *= BURST_DECAY;
    }
}

#[inline]
fn centered(rng: &mut SmallRng) -> f32 {
    rng.gen::<f32>() - 0.5
}

fn helix_point(i: usize, count: usize, phase: f32, rng: &mut SmallRng) -> Vec3 {
    let f = i as f32 / count as f32;
    let t = f * std::f32::consts::TAU * HELIX_TURNS + phase;
    Vec3::new(
        t.cos() * HELIX_RADIUS + centered(rng) * 2.0 * STRAND_JITTER,
        (f - 0.5) * HELIX_HEIGHT,
        t.sin() * HELIX_RADIUS + centered(rng) * 2.0 * STRAND_JITTER,
    )
}
