//! RNG module - deterministic randomness and the biased piece draw
//!
//! The draw replicates the classic console algorithm rather than a 7-bag:
//! pick one of 8 outcomes (7 shapes plus a "reroll" sentinel); on a repeat
//! of the active shape or the sentinel, draw once more from the 7 real
//! shapes and keep whatever comes up. Immediate repeats land around 3.5%
//! instead of the uniform 1/7, every other shape around 16%.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Upcoming-piece generator, shared by both players.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Unbiased draw for the very first piece of a game, when there is no
    /// active shape to bias against.
    pub fn first(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(7) as usize]
    }

    /// Draw the shape that will follow `active`.
    pub fn next(&mut self, active: PieceKind) -> PieceKind {
        let draw = self.rng.next_range(8) as usize;
        if draw == active.index() || draw == 7 {
            // Repeat or reroll sentinel: one more draw from the real
            // shapes, kept unconditionally.
            return PieceKind::ALL[self.rng.next_range(7) as usize];
        }
        PieceKind::ALL[draw]
    }
}
