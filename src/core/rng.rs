//! RNG module - piece randomization
//!
//! Draws uniformly from the seven kinds, redrawing whenever the result would
//! repeat the immediately preceding draw. Only one step of history is kept;
//! beyond the no-repeat rule there is no bag or weighting guarantee.
//!
//! Uses a simple LCG so piece sequences are deterministic per seed.

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

/// Piece generator with a one-step no-repeat rule
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    last: Option<PieceKind>,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            last: None,
        }
    }

    /// Draw the next piece kind; never equal to the previous draw.
    pub fn draw(&mut self) -> PieceKind {
        loop {
            let kind = PieceKind::ALL[self.rng.next_range(7) as usize];
            if Some(kind) != self.last {
                self.last = Some(kind);
                return kind;
            }
        }
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
