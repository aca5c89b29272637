// Host-side tests for the shared pointer/scroll state.

use glam::Vec2;
use site_core::InputState;

#[test]
fn pointer_defaults_to_viewport_center() {
    let mut input = InputState::new(1000.0, 800.0);
    // No pointer event yet: the raw reading sits at the center
    assert_eq!(input.pointer.raw_ndc(), Vec2::ZERO);
    // A frame before the first event must be harmless and stay at rest
    input.step();
    assert_eq!(input.pointer.smoothed, Vec2::ZERO);
    assert!(input.pointer.speed.abs() < 1e-6);
}

#[test]
fn smoothed_converges_to_raw() {
    let mut input = InputState::new(1000.0, 1000.0);
    input.set_pointer_px(1000.0, 1000.0); // ndc (1, 1)
    for _ in 0..120 {
        input.step();
    }
    let s = input.pointer.smoothed;
    assert!((s.x - 1.0).abs() < 0.01, "x residual too large: {}", s.x);
    assert!((s.y - 1.0).abs() < 0.01, "y residual too large: {}", s.y);
}

#[test]
fn smoothed_approach_is_monotonic() {
    let mut input = InputState::new(1000.0, 1000.0);
    input.set_pointer_px(1000.0, 500.0);
    let mut prev = input.pointer.smoothed.x;
    for _ in 0..60 {
        input.step();
        let cur = input.pointer.smoothed.x;
        assert!(cur >= prev, "smoothed x went backwards: {} -> {}", prev, cur);
        assert!(cur <= 1.0 + 1e-6);
        prev = cur;
    }
}

#[test]
fn speed_rises_with_motion_and_is_clamped() {
    let mut input = InputState::new(1000.0, 1000.0);
    let mut x = 0.0_f32;
    for _ in 0..100 {
        x += 100.0; // violent motion, ndc delta 0.2 per frame
        input.set_pointer_px(x % 1000.0, 500.0);
        input.step();
        assert!(input.pointer.speed <= 1.0);
    }
    assert!(input.pointer.speed > 0.3, "speed never rose: {}", input.pointer.speed);
}

#[test]
fn speed_decays_to_rest_when_pointer_stops() {
    let mut input = InputState::new(1000.0, 1000.0);
    for i in 0..20 {
        input.set_pointer_px(i as f32 * 50.0, 500.0);
        input.step();
    }
    assert!(input.pointer.speed > 0.0);
    for _ in 0..200 {
        input.step();
    }
    assert!(
        input.pointer.speed < 1e-3,
        "speed failed to decay: {}",
        input.pointer.speed
    );
}

#[test]
fn scroll_progress_endpoints_and_degenerate_page() {
    let mut input = InputState::new(1000.0, 1000.0);
    // A page that does not scroll reports zero progress, not NaN
    input.set_scroll(0.0, 0.0);
    assert_eq!(input.scroll.progress(), 0.0);

    input.set_scroll(0.0, 2000.0);
    assert_eq!(input.scroll.progress(), 0.0);
    input.set_scroll(2000.0, 2000.0);
    assert_eq!(input.scroll.progress(), 1.0);
    input.set_scroll(500.0, 2000.0);
    assert!((input.scroll.progress() - 0.25).abs() < 1e-6);
    // Overscroll clamps
    input.set_scroll(3000.0, 2000.0);
    assert_eq!(input.scroll.progress(), 1.0);
}

#[test]
fn linear_sweep_smoothed_lags_and_increases() {
    let mut input = InputState::new(1000.0, 1000.0);
    // Park the pointer at the left edge and let smoothing settle there
    input.set_pointer_px(0.0, 500.0);
    for _ in 0..400 {
        input.step();
    }

    // Constant-velocity sweep to the right edge over 20 frames
    let mut prev_smoothed = input.pointer.smoothed.x;
    for frame in 1..=20 {
        input.set_pointer_px(frame as f32 * 50.0, 500.0);
        input.step();
        let raw = input.pointer.raw_ndc().x;
        let smoothed = input.pointer.smoothed.x;
        assert!(
            smoothed > prev_smoothed,
            "frame {}: smoothed x not increasing ({} -> {})",
            frame,
            prev_smoothed,
            smoothed
        );
        assert!(
            smoothed < raw,
            "frame {}: smoothed x {} does not lag raw {}",
            frame,
            smoothed,
            raw
        );
        prev_smoothed = smoothed;
    }
}
