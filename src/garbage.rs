//! Garbage-line buffer - the merge queue between two players
//!
//! A bounded FIFO of opponent-cleared rows waiting to be pushed under the
//! local stack. The network thread appends decoded batches; the game
//! thread merges once per lock event. A mutex serializes the two so a
//! batch can never interleave with the read-shift-clear merge sequence.
//!
//! Capacity policy: rows append until the buffer holds `MAX_GARBAGE_LINES`;
//! overflow is silently dropped, so a batch arriving at a full buffer is
//! discarded whole. A batch containing any row of the wrong width is
//! rejected entirely - half a decoded frame must never reach the board.

use std::sync::Mutex;

use crate::core::board::Board;
use crate::types::{Cell, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL, TOTAL_HEIGHT};

/// Maximum queued garbage rows
pub const MAX_GARBAGE_LINES: usize = 10;

/// One garbage row: a WIDTH-wide 0/garbage pattern
pub type GarbageRow = [Cell; BOARD_WIDTH as usize];

/// Thread-safe garbage line queue, shared by reference between the
/// network receive path and the engine
#[derive(Debug, Default)]
pub struct GarbageBuffer {
    lines: Mutex<Vec<GarbageRow>>,
}

impl GarbageBuffer {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::with_capacity(MAX_GARBAGE_LINES)),
        }
    }

    /// Append a batch of decoded rows.
    ///
    /// Every cell is normalized to the garbage marker on the way in, so
    /// opponent colors never leak into the local board. Returns false if
    /// the batch was rejected (wrong width) or nothing fit.
    pub fn add_lines<R: AsRef<[Cell]>>(&self, rows: &[R]) -> bool {
        if rows.is_empty() || rows.iter().any(|r| r.as_ref().len() != BOARD_WIDTH as usize) {
            return false;
        }

        let mut lines = self.lines.lock().expect("garbage buffer poisoned");
        let mut accepted = false;
        for row in rows {
            if lines.len() >= MAX_GARBAGE_LINES {
                break;
            }
            let mut normalized: GarbageRow = [EMPTY_CELL; BOARD_WIDTH as usize];
            for (slot, &cell) in normalized.iter_mut().zip(row.as_ref()) {
                *slot = if cell == EMPTY_CELL {
                    EMPTY_CELL
                } else {
                    GARBAGE_CELL
                };
            }
            lines.push(normalized);
            accepted = true;
        }
        accepted
    }

    /// Number of queued rows
    pub fn len(&self) -> usize {
        self.lines.lock().expect("garbage buffer poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the queued rows, oldest first (renderer preview)
    pub fn snapshot(&self) -> Vec<GarbageRow> {
        self.lines.lock().expect("garbage buffer poisoned").clone()
    }

    /// Drop everything queued
    pub fn clear(&self) {
        self.lines.lock().expect("garbage buffer poisoned").clear();
    }

    /// Merge every queued row into the bottom of the board.
    ///
    /// Existing rows shift up by the queued count, then the queued rows
    /// fill the vacated bottom, oldest at the top of the inserted block
    /// and newest on the floor. The queue is emptied. The whole sequence
    /// runs under one lock hold; the caller must be the only board
    /// mutator (game thread).
    pub fn apply_to_board(&self, board: &mut Board) -> usize {
        let mut lines = self.lines.lock().expect("garbage buffer poisoned");
        let count = lines.len();
        if count == 0 {
            return 0;
        }

        let total = TOTAL_HEIGHT as i8;
        // Shift the stack up; top rows fall off into the buffer zone,
        // where they will trip the game-over check
        for y in count as i8..total {
            for x in 0..BOARD_WIDTH as i8 {
                let cell = board.cell(x, y);
                board.set_cell(x, y - count as i8, cell);
            }
        }
        // Fill the vacated bottom rows, oldest queued row on top
        for (i, row) in lines.iter().enumerate() {
            let y = total - count as i8 + i as i8;
            for (x, &cell) in row.iter().enumerate() {
                board.set_cell(x as i8, y, cell);
            }
        }

        lines.clear();
        count
    }
}
