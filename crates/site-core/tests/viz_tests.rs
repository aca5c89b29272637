// Host-side tests for the canvas visualizer feeds and the shared loop gate.

use site_core::text::Scrambler;
use site_core::viz::{
    eeg_sample, voice_bar_target, EegTrace, HexStream, LoopGate, VoiceBars, EEG_NOISE_FRAC,
    HEX_MAX_ROWS, HEX_PAIRS_PER_ROW, HEX_ROW_INTERVAL_MS, VOICE_BAR_COUNT,
};

// ---------------- loop gate ----------------

#[test]
fn gate_performs_zero_draws_while_off_screen() {
    let mut gate = LoopGate::new();
    let mut draws = 0;

    // Looper constructed while the canvas is off-screen: nothing starts
    assert!(!gate.set_visible(false));
    assert!(!gate.is_running());

    // Scrolled into view: exactly one cycle starts and draws happen
    assert!(gate.set_visible(true));
    for _ in 0..5 {
        if gate.frame() {
            draws += 1;
        }
    }
    assert_eq!(draws, 5);

    // Scrolled away: the running cycle stops on its next frame
    assert!(!gate.set_visible(false));
    assert!(!gate.frame());
    assert!(!gate.is_running());
    let draws_before = draws;
    if gate.frame() {
        draws += 1;
    }
    assert_eq!(draws, draws_before);
}

#[test]
fn gate_restart_is_idempotent() {
    let mut gate = LoopGate::new();
    assert!(gate.set_visible(true));
    // Duplicate visibility callbacks must not stack a second cycle
    assert!(!gate.set_visible(true));
    assert!(gate.frame());

    assert!(!gate.set_visible(false));
    assert!(!gate.frame());
    // Clean restart after re-entry
    assert!(gate.set_visible(true));
    assert!(gate.frame());
}

// ---------------- voice spectrum ----------------

#[test]
fn voice_targets_stay_in_the_drawable_band() {
    for i in 0..VOICE_BAR_COUNT {
        for t in 0..50 {
            let target = voice_bar_target(t as f64 * 33.0, i);
            assert!((10.0..=70.0).contains(&target), "target out of band: {}", target);
        }
    }
}

#[test]
fn voice_bars_ease_toward_their_targets() {
    let mut bars = VoiceBars::new(VOICE_BAR_COUNT);
    let frozen_time = 1234.0;
    for _ in 0..300 {
        bars.step(frozen_time);
    }
    for (i, h) in bars.heights().iter().enumerate() {
        let target = voice_bar_target(frozen_time, i);
        assert!(
            (h - target).abs() < 0.1,
            "bar {} stuck at {} (target {})",
            i,
            h,
            target
        );
    }
}

#[test]
fn voice_bars_rise_monotonically_from_rest() {
    let mut bars = VoiceBars::new(1);
    let mut prev = 0.0_f32;
    for _ in 0..50 {
        bars.step(1234.0);
        let h = bars.heights()[0];
        assert!(h >= prev);
        prev = h;
    }
}

// ---------------- hex stream ----------------

#[test]
fn hex_rows_are_throttled_and_capped() {
    let mut stream = HexStream::new(3);
    assert!(stream.tick(0.0));
    assert!(!stream.tick(50.0), "row inserted inside the throttle window");
    assert!(stream.tick(HEX_ROW_INTERVAL_MS + 1.0));
    assert_eq!(stream.len(), 2);

    let mut t = 200.0;
    for _ in 0..100 {
        t += HEX_ROW_INTERVAL_MS + 1.0;
        stream.tick(t);
    }
    assert_eq!(stream.len(), HEX_MAX_ROWS);
}

#[test]
fn hex_rows_look_like_byte_pairs() {
    let mut stream = HexStream::new(3);
    stream.tick(0.0);
    let row = stream.rows().next().unwrap();
    // "AB " per pair
    assert_eq!(row.text.len(), HEX_PAIRS_PER_ROW * 3);
    for chunk in row.text.split_whitespace() {
        assert_eq!(chunk.len(), 2);
        assert!(chunk.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn hex_fade_runs_newest_to_oldest() {
    assert_eq!(HexStream::opacity_for(0), 1.0);
    let mut prev = 2.0_f32;
    for i in 0..HEX_MAX_ROWS {
        let o = HexStream::opacity_for(i);
        assert!(o < prev);
        assert!(o > 0.0);
        prev = o;
    }
}

// ---------------- EEG trace ----------------

#[test]
fn eeg_samples_are_bounded_by_the_sine_sum() {
    for x in 0..500 {
        let s = eeg_sample(x as f32, 37.0, 14.0, 12.0);
        assert!(s.abs() <= 14.0 * 1.5 + 1e-3);
    }
}

#[test]
fn eeg_trace_noise_stays_within_its_fraction() {
    let mut trace = EegTrace::new(99);
    let channels: Vec<_> = trace.channels().to_vec();
    for ch in channels {
        for x in 0..200 {
            let with_noise = trace.sample(x as f32, ch);
            let clean = eeg_sample(x as f32, 0.0, ch.amp, ch.freq);
            assert!((with_noise - clean).abs() <= ch.amp * EEG_NOISE_FRAC + 1e-4);
        }
    }
}

#[test]
fn eeg_trace_has_four_channels() {
    let trace = EegTrace::new(1);
    assert_eq!(trace.channels().len(), 4);
}

// ---------------- scramble ----------------

#[test]
fn scramble_resolves_to_the_final_text() {
    let mut scrambler = Scrambler::new(5);
    assert_eq!(scrambler.frame("CASE FILE", 1.0), "CASE FILE");
    assert_eq!(scrambler.frame("CASE FILE", 2.0), "CASE FILE");
}

#[test]
fn scramble_preserves_length_and_spaces() {
    let mut scrambler = Scrambler::new(5);
    let text = "FIELD OPERATIONS";
    for step in 0..10 {
        let out = scrambler.frame(text, step as f32 / 10.0);
        assert_eq!(out.chars().count(), text.chars().count());
        for (a, b) in out.chars().zip(text.chars()) {
            if b == ' ' {
                assert_eq!(a, ' ');
            }
        }
    }
}

#[test]
fn scramble_reveals_the_settled_prefix() {
    let mut scrambler = Scrambler::new(5);
    let text = "EVIDENCE";
    let out = scrambler.frame(text, 0.5);
    // The first half has settled into the real characters
    assert_eq!(&out[..4], &text[..4]);
}
