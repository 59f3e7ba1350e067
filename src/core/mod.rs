//! Core module - pure game logic
//!
//! Game rules, state, and the simulation engine. Nothing in here touches
//! I/O, timers, or the network; the one shared-state seam (the garbage
//! buffer) lives outside in `crate::garbage`.

pub mod board;
pub mod engine;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod srs;

// Re-export commonly used types
pub use board::Board;
pub use engine::{Engine, EngineConfig, LockEvent};
pub use piece::Piece;
pub use rng::PieceRng;
pub use snapshot::{BoardSnapshot, GameSnapshot};
