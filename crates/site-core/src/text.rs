//! Scramble-reveal text effect.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SCRAMBLE_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Total frames a scramble reveal runs for (about a second at 30 ms steps).
pub const SCRAMBLE_FRAMES: u32 = 33;

/// Scramble effect with its own glyph source.
#[derive(Clone, Debug)]
pub struct Scrambler {
    rng: SmallRng,
}

impl Scrambler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn frame(&mut self, final_text: &str, progress: f32) -> String {
        scramble_frame(final_text, progress, &mut self.rng)
    }
}

/// One frame of the scramble: characters before the progress front are shown
/// verbatim, the rest cycle through random glyphs. Spaces always pass through.
pub fn scramble_frame(final_text: &str, progress: f32, rng: &mut SmallRng) -> String {
    if progress >= 1.0 {
        return final_text.to_string();
    }
    let chars: Vec<char> = final_text.chars().collect();
    let front = chars.len() as f32 * progress.max(0.0);
    let mut out = String::with_capacity(final_text.len());
    for (i, c) in chars.iter().enumerate() {
        if *c == ' ' {
            out.push(' ');
        } else if (i as f32) < front {
            out.push(*c);
        } else {
            out.push(SCRAMBLE_CHARSET[rng.gen_range(0..SCRAMBLE_CHARSET.len())] as char);
        }
    }
    out
}
