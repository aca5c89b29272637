//! Follow-the-leader trail chain behind the cursor glyph.

use glam::Vec2;

use crate::effects::approach_vec2;

/// Ordered chain where node 0 chases the leader and node *i* chases node
/// *i - 1*, all with the same smoothing factor. Produces a tapering tail
/// rather than independent particles.
#[derive(Clone, Debug)]
pub struct TrailChain {
    nodes: Vec<Vec2>,
    factor: f32,
}

impl TrailChain {
    pub fn new(len: usize, factor: f32) -> Self {
        Self {
            nodes: vec![Vec2::ZERO; len],
            factor,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Vec2] {
        &self.nodes
    }

    /// Teleport the whole chain, used when the cursor first appears.
    pub fn snap_to(&mut self, p: Vec2) {
        for n in &mut self.nodes {
            *n = p;
        }
    }

    /// Advance one frame toward the leader position.
    pub fn step(&mut self, leader: Vec2) {
        let mut prev = leader;
        for n in &mut self.nodes {
            *n = approach_vec2(*n, prev, self.factor);
            prev = *n;
        }
    }
}
