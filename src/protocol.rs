//! Protocol module - board-frame semantics for the transport layer
//!
//! The transport (sockets, framing, reconnects) lives outside this crate;
//! what is specified here is the meaning of the bytes. Outbound state is
//! a dense HEIGHT x WIDTH grid of i32 cell codes serialized as one JSON
//! object per line; inbound attack rows are reduced to a binary
//! filled/empty pattern before they may touch the local board, so an
//! opponent's colors never leak across.
//!
//! Cell codes:
//! - `0` empty, `1..=7` piece colors, `8` garbage
//! - `-1` pending clear (rows a renderer is about to flash away)
//! - `-2` ghost piece outline
//! - `200` weight piece body, `201` bomb piece body
//! - `(symbol << 16) | color` for an item-bearing cell

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::engine::Engine;
use crate::garbage::GarbageRow;
use crate::types::{Cell, ItemKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ZONE, EMPTY_CELL, GARBAGE_CELL};

/// Reserved code for rows awaiting an animated removal
pub const PENDING_CLEAR_MARK: i32 = -1;
/// Ghost piece outline
pub const GHOST_MARK: i32 = -2;
/// Weight special piece body
pub const WEIGHT_MARK: i32 = 200;
/// Bomb special piece body
pub const BOMB_MARK: i32 = 201;

/// Dense visible-board grid of wire cell codes
pub type FrameGrid = [[i32; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Encode an item-bearing cell: display symbol in the high half, color
/// code in the low byte
pub fn encode_item_cell(item: ItemKind, color: Cell) -> i32 {
    ((item.symbol() as i32) << 16) | i32::from(color)
}

/// Outbound board-state frame, sent on a fixed tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFrame {
    pub seq: u64,
    pub cells: Vec<Vec<i32>>,
}

/// Outbound attack: the rows a lock cleared, for the opponent's buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackFrame {
    pub seq: u64,
    pub rows: Vec<Vec<i32>>,
}

/// Render the engine's visible state into wire cell codes.
///
/// Layer order matches the renderer's expectations: locked board cells
/// (with item encodings), then the ghost outline, then the falling piece
/// on top.
pub fn frame_grid(engine: &Engine) -> FrameGrid {
    let board = engine.board();
    let mut grid = [[0i32; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

    for (vy, row) in grid.iter_mut().enumerate() {
        let y = vy as i8 + BUFFER_ZONE as i8;
        for (x, slot) in row.iter_mut().enumerate() {
            let cell = board.cell(x as i8, y);
            if cell == EMPTY_CELL {
                continue;
            }
            let item = board.item_at(x as i8, y);
            *slot = if item.is_item() {
                encode_item_cell(item, cell)
            } else {
                i32::from(cell)
            };
        }
    }

    if let Some(ghost) = engine.ghost() {
        for (x, y) in ghost.cells() {
            put_visible(&mut grid, x, y, GHOST_MARK);
        }
    }

    if let Some(piece) = engine.current() {
        let special = piece.item_offset().map(|(_, item)| item);
        for &(dx, dy) in piece.shape().iter() {
            let code = match special {
                Some(ItemKind::Weight) if piece.is_special() => WEIGHT_MARK,
                Some(ItemKind::Bomb) if piece.is_special() => BOMB_MARK,
                _ => {
                    let item = piece.item_at(dx, dy);
                    if item.is_item() {
                        encode_item_cell(item, piece.color())
                    } else {
                        i32::from(piece.color())
                    }
                }
            };
            put_visible(&mut grid, piece.x + dx, piece.y + dy, code);
        }
    }

    grid
}

fn put_visible(grid: &mut FrameGrid, x: i8, y: i8, code: i32) {
    let vy = y - BUFFER_ZONE as i8;
    if x >= 0 && x < BOARD_WIDTH as i8 && vy >= 0 && vy < BOARD_HEIGHT as i8 {
        grid[vy as usize][x as usize] = code;
    }
}

impl BoardFrame {
    /// Capture the engine's current frame
    pub fn capture(seq: u64, engine: &Engine) -> Self {
        Self {
            seq,
            cells: frame_grid(engine).iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Serialize as one line of JSON
    pub fn to_line(&self) -> Result<String> {
        serde_json::to_string(self).context("encode board frame")
    }

    /// Parse a received line and validate its dimensions
    pub fn from_line(line: &str) -> Result<Self> {
        let frame: Self = serde_json::from_str(line).context("decode board frame")?;
        if frame.cells.len() != BOARD_HEIGHT as usize {
            return Err(anyhow!(
                "board frame has {} rows, expected {}",
                frame.cells.len(),
                BOARD_HEIGHT
            ));
        }
        if let Some(row) = frame.cells.iter().find(|r| r.len() != BOARD_WIDTH as usize) {
            return Err(anyhow!(
                "board frame row has {} cells, expected {}",
                row.len(),
                BOARD_WIDTH
            ));
        }
        Ok(frame)
    }
}

impl AttackFrame {
    /// Build an attack frame from the normalized rows of a lock event
    pub fn from_rows(seq: u64, rows: &[GarbageRow]) -> Self {
        Self {
            seq,
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&c| i32::from(c)).collect())
                .collect(),
        }
    }

    pub fn to_line(&self) -> Result<String> {
        serde_json::to_string(self).context("encode attack frame")
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let frame: Self = serde_json::from_str(line).context("decode attack frame")?;
        if let Some(row) = frame.rows.iter().find(|r| r.len() != BOARD_WIDTH as usize) {
            return Err(anyhow!(
                "attack row has {} cells, expected {}",
                row.len(),
                BOARD_WIDTH
            ));
        }
        Ok(frame)
    }

    /// Reduce the received rows to the binary pattern the garbage buffer
    /// accepts: anything positive becomes the garbage marker, everything
    /// else (empty, ghost, pending) becomes empty
    pub fn normalized_rows(&self) -> Vec<GarbageRow> {
        self.rows.iter().map(|row| normalize_row(row)).collect()
    }
}

/// Normalize one received row of wire codes to a 0/garbage pattern
pub fn normalize_row(row: &[i32]) -> GarbageRow {
    let mut out: GarbageRow = [EMPTY_CELL; BOARD_WIDTH as usize];
    for (slot, &code) in out.iter_mut().zip(row.iter()) {
        *slot = if code > 0 { GARBAGE_CELL } else { EMPTY_CELL };
    }
    out
}
