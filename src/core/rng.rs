//! RNG module - weighted random piece selection
//!
//! Piece kinds are drawn from a cumulative-weight table so difficulty can
//! skew the distribution (fewer I pieces on Hard). The underlying LCG is
//! deterministic per seed, which keeps engine tests reproducible.

use crate::types::{Difficulty, ItemKind, PieceKind};

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate a random float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (u32::MAX as f64 + 1.0)
    }

    /// Current internal state (restart a game with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Weighted piece generator: cumulative weights over the 7 kinds
#[derive(Debug, Clone)]
pub struct PieceRng {
    cumulative: [f64; 7],
    rng: SimpleRng,
}

impl PieceRng {
    /// Create a generator with uniform weights
    pub fn new(seed: u32) -> Self {
        let mut cumulative = [0.0; 7];
        for (i, slot) in cumulative.iter_mut().enumerate() {
            *slot = (i + 1) as f64;
        }
        Self {
            cumulative,
            rng: SimpleRng::new(seed),
        }
    }

    /// Adjust one kind's draw weight; the rest of the table shifts to keep
    /// cumulative ordering intact
    pub fn set_weight(&mut self, kind: PieceKind, weight: f64) {
        let idx = kind.index();
        let previous = if idx == 0 {
            0.0
        } else {
            self.cumulative[idx - 1]
        };
        let delta = weight - (self.cumulative[idx] - previous);
        for slot in &mut self.cumulative[idx..] {
            *slot += delta;
        }
    }

    /// Current draw weight of one kind
    pub fn weight(&self, kind: PieceKind) -> f64 {
        let idx = kind.index();
        let previous = if idx == 0 {
            0.0
        } else {
            self.cumulative[idx - 1]
        };
        self.cumulative[idx] - previous
    }

    /// Apply a difficulty preset (adjusts the I piece frequency)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.set_weight(PieceKind::I, difficulty.i_piece_weight());
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let total = self.cumulative[6];
        let r = self.rng.next_f64() * total;
        for (i, &bound) in self.cumulative.iter().enumerate() {
            if r < bound {
                return PieceKind::ALL[i];
            }
        }
        PieceKind::ALL[6]
    }

    /// Roll the item assignment for an item piece: which clear-item kind
    /// (or special piece) and which block carries it
    pub fn roll_item_kind(&mut self) -> ItemKind {
        match self.rng.next_range(5) {
            0 => ItemKind::LineClear,
            1 => ItemKind::ColumnClear,
            2 => ItemKind::CrossClear,
            3 => ItemKind::Weight,
            _ => ItemKind::Bomb,
        }
    }

    /// Pick the mino (Spawn-rotation index) that carries an item
    pub fn roll_item_block(&mut self) -> usize {
        self.rng.next_range(4) as usize
    }

    /// Current rng state (reused on reset so runs stay reproducible)
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new(1)
    }
}
