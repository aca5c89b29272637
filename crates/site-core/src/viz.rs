//! Synthetic data feeds for the case-study canvases, plus the visibility gate
//! that every canvas loop shares.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// Idempotent start/stop bookkeeping for a visibility-gated animation loop.
///
/// The driver calls [`LoopGate::set_visible`] from its intersection callback
/// and starts a new frame cycle only when it returns `true`; each frame calls
/// [`LoopGate::frame`] and stops requesting frames when it returns `false`.
/// An off-screen loop therefore performs zero draws, and repeated visibility
/// callbacks never stack a second cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopGate {
    visible: bool,
    running: bool,
}

impl LoopGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a new frame cycle should be started.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.visible = visible;
        if visible && !self.running {
            self.running = true;
            true
        } else {
            false
        }
    }

    /// Returns true when the current frame should draw and re-queue.
    pub fn frame(&mut self) -> bool {
        if self.visible {
            true
        } else {
            self.running = false;
            false
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ---------------- EEG trace ----------------

#[derive(Clone, Copy, Debug)]
pub struct EegChannel {
    /// Baseline as a fraction of canvas height.
    pub y_frac: f32,
    pub amp: f32,
    pub freq: f32,
    pub alpha: f32,
    /// Drawn in the accent color instead of the primary.
    pub accent: bool,
}

pub fn eeg_channels() -> SmallVec<[EegChannel; 4]> {
    SmallVec::from_slice(&[
        EegChannel { y_frac: 0.2, amp: 10.0, freq: 8.0, alpha: 0.7, accent: false },
        EegChannel { y_frac: 0.4, amp: 14.0, freq: 12.0, alpha: 0.6, accent: true },
        EegChannel { y_frac: 0.6, amp: 8.0, freq: 20.0, alpha: 0.5, accent: false },
        EegChannel { y_frac: 0.8, amp: 12.0, freq: 6.0, alpha: 0.4, accent: true },
    ])
}

/// Horizontal scroll speed of the trace, in phase units per frame.
pub const EEG_SCROLL_RATE: f32 = 1.5;
/// Noise amplitude as a fraction of the channel amplitude.
pub const EEG_NOISE_FRAC: f32 = 0.15;

/// Deterministic part of an EEG sample: two detuned sines around the baseline.
#[inline]
pub fn eeg_sample(x: f32, offset: f32, amp: f32, freq: f32) -> f32 {
    ((x + offset) * freq * 0.01).sin() * amp + ((x + offset) * freq * 0.023).sin() * amp * 0.5
}

/// Scrolling multi-channel trace with its own noise source.
#[derive(Clone, Debug)]
pub struct EegTrace {
    channels: SmallVec<[EegChannel; 4]>,
    offset: f32,
    rng: SmallRng,
}

impl EegTrace {
    pub fn new(seed: u64) -> Self {
        Self {
            channels: eeg_channels(),
            offset: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn channels(&self) -> &[EegChannel] {
        &self.channels
    }

    /// Sample one channel at pixel column `x`, noise included.
    #[inline]
    pub fn sample(&mut self, x: f32, channel: EegChannel) -> f32 {
        eeg_sample(x, self.offset, channel.amp, channel.freq)
            + self.rng.gen::<f32>() * channel.amp * EEG_NOISE_FRAC
    }

    /// Scroll the trace by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.offset += EEG_SCROLL_RATE;
    }
}

// ---------------- Voice spectrum ----------------

pub const VOICE_BAR_COUNT: usize = 40;
pub const VOICE_BAR_SMOOTHING: f32 = 0.1;

/// Target height for one spectrum bar at the given wall-clock millis.
#[inline]
pub fn voice_bar_target(time_ms: f64, index: usize) -> f32 {
    let t = time_ms;
    let i = index as f64;
    ((t * 0.002 + i * 0.2).sin() * 20.0 + (t * 0.005 + i * 0.5).sin() * 10.0 + 40.0) as f32
}

/// Bar heights eased toward their moving targets each frame.
#[derive(Clone, Debug)]
pub struct VoiceBars {
    heights: Vec<f32>,
}

impl VoiceBars {
    pub fn new(count: usize) -> Self {
        Self {
            heights: vec![0.0; count],
        }
    }

    pub fn step(&mut self, time_ms: f64) {
        for (i, h) in self.heights.iter_mut().enumerate() {
            let target = voice_bar_target(time_ms, i);
            *h += (target - *h) * VOICE_BAR_SMOOTHING;
        }
    }

    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }
}

// ---------------- Hex stream ----------------

pub const HEX_MAX_ROWS: usize = 12;
pub const HEX_ROW_INTERVAL_MS: f64 = 100.0;
pub const HEX_PAIRS_PER_ROW: usize = 8;
const HEX_CHARS: &[u8] = b"0123456789ABCDEF";

#[derive(Clone, Debug)]
pub struct HexRow {
    pub text: String,
    pub critical: bool,
}

/// Scrolling log of hex byte pairs, newest first, fed at a throttled rate.
#[derive(Clone, Debug)]
pub struct HexStream {
    rows: VecDeque<HexRow>,
    last_update_ms: f64,
    rng: SmallRng,
}

impl HexStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rows: VecDeque::with_capacity(HEX_MAX_ROWS + 1),
            last_update_ms: f64::NEG_INFINITY,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Insert a fresh row if the throttle interval has elapsed. Returns true
    /// when the row set changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_update_ms <= HEX_ROW_INTERVAL_MS {
            return false;
        }
        self.last_update_ms = now_ms;
        let row = self.generate_row();
        self.rows.push_front(row);
        self.rows.truncate(HEX_MAX_ROWS);
        true
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &HexRow> {
        self.rows.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row fade by age: the newest row is fully opaque.
    #[inline]
    pub fn opacity_for(index: usize) -> f32 {
        1.0 - index as f32 / HEX_MAX_ROWS as f32
    }

    fn generate_row(&mut self) -> HexRow {
        let mut text = String::with_capacity(HEX_PAIRS_PER_ROW * 3);
        for _ in 0..HEX_PAIRS_PER_ROW {
            for _ in 0..2 {
                let c = HEX_CHARS[self.rng.gen_range(0..HEX_CHARS.len())] as char;
                text.push(c);
            }
            text.push(' ');
        }
        HexRow {
            text,
            critical: self.rng.gen::<f32>() > 0.9,
        }
    }
}
