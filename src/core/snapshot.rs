//! Snapshot module - board captures and the render-facing game view
//!
//! `BoardSnapshot` freezes the visible field just before a piece locks;
//! the rows the lock then clears are read back out of it as attack lines
//! for the opponent. `GameSnapshot` is everything a renderer needs for
//! one frame.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::garbage::GarbageRow;
use crate::types::{
    Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ZONE, EMPTY_CELL, GARBAGE_CELL, PREVIEW_LEN,
};

/// Visible board grid (buffer zone excluded)
pub type VisibleGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// A frozen copy of the visible field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    grid: VisibleGrid,
}

impl BoardSnapshot {
    /// Capture the visible area of a board
    pub fn capture(board: &Board) -> Self {
        Self {
            grid: board.visible(),
        }
    }

    /// Cell at visible coordinates; out of range reads empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if y < BOARD_HEIGHT as usize && x < BOARD_WIDTH as usize {
            self.grid[y][x]
        } else {
            EMPTY_CELL
        }
    }

    pub fn grid(&self) -> &VisibleGrid {
        &self.grid
    }

    /// Extract the given absolute board rows as attack lines.
    ///
    /// Rows inside the buffer zone are skipped; every filled cell is
    /// normalized to the garbage marker so the receiver never sees the
    /// sender's colors.
    pub fn attack_lines(&self, rows: &[u8]) -> Vec<GarbageRow> {
        let mut out = Vec::with_capacity(rows.len());
        for &row in rows {
            if row < BUFFER_ZONE {
                continue;
            }
            let visible_row = (row - BUFFER_ZONE) as usize;
            if visible_row >= BOARD_HEIGHT as usize {
                continue;
            }
            let mut line: GarbageRow = [EMPTY_CELL; BOARD_WIDTH as usize];
            for (x, slot) in line.iter_mut().enumerate() {
                *slot = if self.grid[visible_row][x] == EMPTY_CELL {
                    EMPTY_CELL
                } else {
                    GARBAGE_CELL
                };
            }
            out.push(line);
        }
        out
    }
}

/// Render-facing view of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Visible field, locked cells only
    pub board: VisibleGrid,
    /// The falling piece (absolute coordinates, buffer zone included)
    pub active: Option<Piece>,
    /// Anchor row where the active piece would rest after a hard drop
    pub ghost_y: Option<i8>,
    /// Held piece, item payload intact
    pub hold: Option<Piece>,
    /// Upcoming pieces, soonest first
    pub next_queue: ArrayVec<Piece, PREVIEW_LEN>,
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: i64,
    pub lines: u32,
    pub level: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Kinds of the preview pieces (simple renderers ignore items)
    pub fn next_kinds(&self) -> ArrayVec<PieceKind, PREVIEW_LEN> {
        self.next_queue.iter().map(|p| p.kind).collect()
    }
}
