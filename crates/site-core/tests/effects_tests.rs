// Host-side tests for the eased-value effect math.

use glam::Vec2;
use site_core::constants::*;
use site_core::{
    approach, magnetic_target, parallax_offset, section_color, tilt_target, EasedTilt, EasedVec2,
};

#[test]
fn approach_converges_within_the_documented_frame_budget() {
    // Factor 0.35 leaves under 1% residual after ~13 frames
    let mut v = 0.0_f32;
    for _ in 0..13 {
        v = approach(v, 1.0, 0.35);
    }
    assert!((1.0 - v).abs() < 0.01, "residual after 13 frames: {}", 1.0 - v);
}

#[test]
fn eased_offset_approaches_monotonically_and_settles() {
    let mut eased = EasedVec2::new(MAGNETIC_SMOOTHING);
    eased.target = Vec2::new(24.0, -16.0);
    let mut prev_dist = eased.target.length();
    for _ in 0..120 {
        eased.step();
        let dist = (eased.target - eased.current).length();
        assert!(dist <= prev_dist + 1e-6, "distance to target grew");
        prev_dist = dist;
    }
    assert!(prev_dist < 0.01);
}

#[test]
fn magnetic_offset_eases_back_to_rest_after_hover_exit() {
    let mut eased = EasedVec2::new(MAGNETIC_SMOOTHING);
    eased.target = magnetic_target(
        Vec2::new(130.0, 80.0),
        Vec2::new(100.0, 100.0),
        MAGNETIC_STRENGTH,
    );
    for _ in 0..30 {
        eased.step();
    }
    assert!(eased.current.length() > 1.0);

    // Hover exit: the target snaps to zero, the rendered offset eases home
    eased.target = Vec2::ZERO;
    let mut prev = eased.current.length();
    for _ in 0..120 {
        eased.step();
        let len = eased.current.length();
        assert!(len <= prev + 1e-6);
        prev = len;
    }
    assert!(prev < 0.01, "offset failed to return to rest: {}", prev);
}

#[test]
fn magnetic_target_scales_with_strength() {
    let pointer = Vec2::new(150.0, 150.0);
    let center = Vec2::new(100.0, 100.0);
    let weak = magnetic_target(pointer, center, MAGNETIC_STRENGTH);
    let strong = magnetic_target(pointer, center, MAGNETIC_STRENGTH_STRONG);
    assert!((weak - Vec2::new(15.0, 15.0)).length() < 1e-5);
    assert!(strong.length() > weak.length());
}

#[test]
fn tilt_maps_box_fractions_to_the_degree_range() {
    // Center: flat
    let (rx, ry) = tilt_target(0.5, 0.5);
    assert!(rx.abs() < 1e-6 && ry.abs() < 1e-6);

    // Right edge leans right, bottom edge leans back (inverted axis)
    let (_, ry) = tilt_target(1.0, 0.5);
    assert!((ry - TILT_MAX_DEG).abs() < 1e-5);
    let (rx, _) = tilt_target(0.5, 1.0);
    assert!((rx + TILT_MAX_DEG).abs() < 1e-5);

    // Whole box stays inside the range
    for fx in [0.0, 0.25, 0.5, 0.75, 1.0] {
        for fy in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let (rx, ry) = tilt_target(fx, fy);
            assert!(rx.abs() <= TILT_MAX_DEG + 1e-5);
            assert!(ry.abs() <= TILT_MAX_DEG + 1e-5);
        }
    }
}

#[test]
fn eased_tilt_follows_and_releases() {
    let mut tilt = EasedTilt::new(TILT_SMOOTHING);
    let (rx, ry) = tilt_target(0.9, 0.1);
    tilt.target_rx = rx;
    tilt.target_ry = ry;
    for _ in 0..200 {
        tilt.step();
    }
    assert!((tilt.rx - rx).abs() < 0.01);
    assert!((tilt.ry - ry).abs() < 0.01);

    tilt.target_rx = 0.0;
    tilt.target_ry = 0.0;
    for _ in 0..200 {
        tilt.step();
    }
    assert!(tilt.rx.abs() < 0.01 && tilt.ry.abs() < 0.01);
}

#[test]
fn parallax_scales_with_sensitivity() {
    let pointer = Vec2::new(0.5, -0.5);
    let shallow = parallax_offset(pointer, 0.02);
    let deep = parallax_offset(pointer, 0.04);
    assert!((deep - shallow * 2.0).length() < 1e-5);
    assert!((shallow.x - 0.5 * 0.02 * PARALLAX_RANGE_PX).abs() < 1e-5);
}

#[test]
fn section_color_hits_the_palette_endpoints_exactly() {
    assert_eq!(section_color(0.0, &SECTION_COLORS), SECTION_COLORS[0]);
    assert_eq!(
        section_color(1.0, &SECTION_COLORS),
        SECTION_COLORS[SECTION_COLORS.len() - 1]
    );
    // Out-of-range progress clamps rather than extrapolating
    assert_eq!(section_color(-0.5, &SECTION_COLORS), SECTION_COLORS[0]);
    assert_eq!(
        section_color(1.5, &SECTION_COLORS),
        SECTION_COLORS[SECTION_COLORS.len() - 1]
    );
}

#[test]
fn section_color_stays_a_convex_combination() {
    for step in 0..=100 {
        let progress = step as f32 / 100.0;
        let color = section_color(progress, &SECTION_COLORS);
        let scaled = progress * SECTION_COLORS.len() as f32;
        let idx = (scaled.floor() as usize).min(SECTION_COLORS.len() - 2);
        let a = SECTION_COLORS[idx];
        let b = SECTION_COLORS[idx + 1];
        for c in 0..3 {
            let lo = a[c].min(b[c]);
            let hi = a[c].max(b[c]);
            assert!(
                color[c] >= lo && color[c] <= hi,
                "channel {} escaped its bracket at progress {}",
                c,
                progress
            );
        }
    }
}
