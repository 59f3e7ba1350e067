//! Tetris simulation core for two-player matches.
//!
//! The authoritative model of the playing field and its physics: SRS
//! rotation with wall kicks, T-spin detection, item-based board mutation,
//! weighted piece randomization, scoring/leveling, and the mutex-guarded
//! garbage-line buffer that carries opponent attacks between a network
//! thread and the game thread.
//!
//! Rendering, input devices, persistence, and socket plumbing are left to
//! the host: it feeds [`types::GameAction`]s and gravity ticks into an
//! [`core::Engine`], reads [`core::GameSnapshot`]s back, and shuttles
//! [`protocol`] frames across its transport.

pub mod core;
pub mod garbage;
pub mod protocol;
pub mod scoreboard;
pub mod types;
