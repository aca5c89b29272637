// Frame smoothing and interaction tuning constants shared across controllers.

// Pointer tracking
pub const POINTER_SMOOTHING: f32 = 0.08; // raw -> smoothed per frame
pub const POINTER_SPEED_GAIN: f32 = 10.0; // ndc units/frame -> speed estimate
pub const POINTER_SPEED_BLEND: f32 = 0.1; // estimate blend per frame
pub const POINTER_SPEED_DECAY: f32 = 0.95; // per-frame decay toward rest

// Cursor glyph and trail
pub const CURSOR_SMOOTHING: f32 = 0.35;
pub const TRAIL_SMOOTHING: f32 = 0.6;
pub const TRAIL_LENGTH: usize = 8;
pub const RIPPLE_DURATION_SEC: f32 = 0.6;
pub const RIPPLE_MAX_DIAMETER_PX: f32 = 80.0;
pub const RIPPLE_START_OPACITY: f32 = 0.6;

// Hover effects
pub const MAGNETIC_SMOOTHING: f32 = 0.15;
pub const MAGNETIC_STRENGTH: f32 = 0.3;
pub const MAGNETIC_STRENGTH_STRONG: f32 = 0.4; // contact links pull harder
pub const TILT_SMOOTHING: f32 = 0.1;
pub const TILT_MAX_DEG: f32 = 10.0; // half-range; full swing is twice this
pub const TILT_HOVER_SCALE: f32 = 1.02;
pub const PARALLAX_RANGE_PX: f32 = 100.0;

// Particle field layout
pub const HELIX_RADIUS: f32 = 12.0;
pub const HELIX_HEIGHT: f32 = 120.0;
pub const HELIX_TURNS: f32 = 6.0;
pub const STRAND_FRACTION: f32 = 0.35; // per strand; the rest is ambient scatter
pub const STRAND_JITTER: f32 = 1.0; // +/- on strand x/z
pub const SCATTER_SPAN: [f32; 3] = [80.0, 80.0, 40.0];
pub const PARTICLE_SIZE_MIN: f32 = 0.5;
pub const PARTICLE_SIZE_SPAN: f32 = 3.0;

// Particle field motion
pub const POINTER_FIELD_SCALE: f32 = 40.0; // smoothed ndc -> helix-space projection
pub const PROXIMITY_RADIUS: f32 = 30.0;
pub const REPULSION_BASE: f32 = 8.0;
pub const REPULSION_SPEED_GAIN: f32 = 12.0;
pub const REPULSION_Z_WIGGLE: f32 = 0.3;
pub const JITTER_AMP: [f32; 3] = [0.5, 0.5, 0.3];
pub const BURST_DECAY: f32 = 0.92;
pub const BURST_CUTOFF: f32 = 0.01;
pub const BURST_AMPLITUDE: f32 = 3.0;
pub const ROT_BASE_RATE: f32 = 0.08; // rad/sec at rest
pub const ROT_SPEED_GAIN: f32 = 0.15; // extra rad/sec at full pointer speed
pub const WOBBLE_RATE: f32 = 0.05;
pub const WOBBLE_AMP: f32 = 0.15;
pub const POINTER_TILT_X: f32 = 0.1;
pub const POINTER_TILT_Z: f32 = 0.05;
pub const SCROLL_FIELD_DRIFT: f32 = 0.02; // px scrolled -> field y offset

// Camera
pub const CAMERA_Z: f32 = 50.0;
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Device-capability heuristic for the particle population
pub const PARTICLES_FULL: usize = 2000;
pub const PARTICLES_REDUCED: usize = 1000;
pub const REDUCED_DPR_THRESHOLD: f64 = 2.0;
pub const REDUCED_WIDTH_THRESHOLD: f64 = 768.0;

// Site palette (primary / accent / light)
pub const COLOR_PRIMARY: [f32; 3] = [0.145, 0.388, 0.922]; // #2563eb
pub const COLOR_ACCENT: [f32; 3] = [0.020, 0.588, 0.412]; // #059669
pub const COLOR_LIGHT: [f32; 3] = [0.576, 0.773, 0.992]; // #93c5fd

// Background stops walked through on scroll, hero -> contact
pub const SECTION_COLORS: [[u8; 3]; 8] = [
    [248, 249, 250],
    [240, 242, 248],
    [248, 249, 250],
    [237, 242, 253],
    [248, 249, 250],
    [255, 255, 255],
    [248, 249, 250],
    [240, 244, 250],
];
