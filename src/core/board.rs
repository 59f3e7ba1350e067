//! Board module - manages the game grid
//!
//! The grid is 10 columns by 24 rows: 20 visible rows plus a 4-row hidden
//! buffer zone above them where pieces spawn. Cells are flat-array color
//! codes (row-major, `y * WIDTH + x`); item blocks live in a sparse map
//! keyed by flat index so the plain and item game modes share one board.
//! Any filled cell inside the buffer zone means the game is over.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::core::piece::Piece;
use crate::types::{Cell, ItemKind, BOARD_WIDTH, BOMB_RADIUS, BUFFER_ZONE, EMPTY_CELL, TOTAL_HEIGHT, WEIGHT_SPAN};

/// Total number of stored cells (visible field + buffer zone)
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (TOTAL_HEIGHT as usize);

/// Cleared-row indices reported by a clearing pass (absolute coordinates)
pub type ClearedRows = ArrayVec<u8, { TOTAL_HEIGHT as usize }>;

/// Result of the item-aware line clearing pass
#[derive(Debug, Clone, Default)]
pub struct LineClearOutcome {
    /// Absolute indices of cleared rows, in clearing order (bottom first)
    pub rows: ClearedRows,
    /// How many of those rows were cleared by an item rather than fullness
    pub item_triggered: usize,
}

/// The playing grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
    items: HashMap<usize, ItemKind>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_SIZE],
            items: HashMap::new(),
        }
    }

    /// Flat index for in-range coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= TOTAL_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Stored height including the buffer zone
    pub fn total_height(&self) -> u8 {
        TOTAL_HEIGHT
    }

    /// Cell color at (x, y); out-of-range reads as empty
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        Self::index(x, y).map_or(EMPTY_CELL, |idx| self.cells[idx])
    }

    /// Set cell color; returns false if out of range
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Item at (x, y); `ItemKind::None` when absent or out of range
    pub fn item_at(&self, x: i8, y: i8) -> ItemKind {
        Self::index(x, y)
            .and_then(|idx| self.items.get(&idx).copied())
            .unwrap_or(ItemKind::None)
    }

    /// Attach or remove an item at (x, y)
    pub fn set_item(&mut self, x: i8, y: i8, item: ItemKind) {
        if let Some(idx) = Self::index(x, y) {
            if item.is_item() {
                self.items.insert(idx, item);
            } else {
                self.items.remove(&idx);
            }
        }
    }

    /// Validity test for a piece transform.
    ///
    /// Every occupied cell must satisfy: x within the walls, y above the
    /// stored bottom, and - when inside the stored grid - empty. Cells
    /// with y < 0 are legal: pieces may extend above the buffer top.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= TOTAL_HEIGHT as i8 {
                return false;
            }
            y < 0 || self.cell(x, y) == EMPTY_CELL
        })
    }

    /// Copy a piece into the grid: color into every in-bounds occupied
    /// cell, item payload into the item map
    pub fn place(&mut self, piece: &Piece) {
        let color = piece.color();
        for &(dx, dy) in piece.shape().iter() {
            let x = piece.x + dx;
            let y = piece.y + dy;
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = color;
                let item = piece.item_at(dx, dy);
                if item.is_item() {
                    self.items.insert(idx, item);
                }
            }
        }
    }

    /// Whether every cell of the given absolute row is filled
    fn is_row_full(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|&c| c != EMPTY_CELL)
    }

    /// Remove one row: shift everything above it down, empty the top row,
    /// and migrate the item map the same way
    fn clear_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            let dst = row * width;
            self.cells.copy_within(src..src + width, dst);
        }
        for cell in &mut self.cells[0..width] {
            *cell = EMPTY_CELL;
        }

        let mut migrated = HashMap::with_capacity(self.items.len());
        for (&idx, &item) in &self.items {
            let row = idx / width;
            if row < y {
                migrated.insert(idx + width, item);
            } else if row > y {
                migrated.insert(idx, item);
            }
            // row == y: the item vanished with its row
        }
        self.items = migrated;
    }

    /// Empty the visible span of one column (no row shifting) and drop
    /// every item in that column
    fn clear_column(&mut self, x: usize) {
        let width = BOARD_WIDTH as usize;
        for y in BUFFER_ZONE as usize..TOTAL_HEIGHT as usize {
            self.cells[y * width + x] = EMPTY_CELL;
        }
        self.items.retain(|idx, _| idx % width != x);
    }

    /// Baseline clearing: remove every full row, bottom to top, re-testing
    /// the same index after each shift so stacked full rows cascade.
    ///
    /// Returns the cleared rows as pre-clear indices (each shift moves the
    /// remaining rows down one, so the running clear count is subtracted);
    /// callers read these rows back out of a board snapshot taken before
    /// the clearing started.
    pub fn clear_full_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = TOTAL_HEIGHT as usize;
        while y > 0 {
            y -= 1;
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push((y - cleared.len()) as u8);
                y += 1; // everything shifted down; test this index again
            }
        }
        cleared
    }

    /// Item-aware row clearing: a row goes when it is full or when any of
    /// its cells carries a line-clear item
    pub fn clear_lines_with_items(&mut self) -> LineClearOutcome {
        let width = BOARD_WIDTH as usize;
        let mut outcome = LineClearOutcome::default();
        let mut y = TOTAL_HEIGHT as usize;
        while y > 0 {
            y -= 1;
            let full = self.is_row_full(y);
            let item_hit = !full
                && (0..width)
                    .any(|x| self.items.get(&(y * width + x)) == Some(&ItemKind::LineClear));
            if full || item_hit {
                self.clear_row(y);
                outcome.rows.push((y - outcome.rows.len()) as u8);
                if item_hit {
                    outcome.item_triggered += 1;
                }
                y += 1;
            }
        }
        outcome
    }

    /// Clear every column that contains a column-clear item
    pub fn clear_columns_with_items(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        for x in 0..width {
            let hit = self
                .items
                .iter()
                .any(|(idx, &item)| idx % width == x && item == ItemKind::ColumnClear);
            if hit {
                self.clear_column(x);
                cleared += 1;
            }
        }
        cleared
    }

    /// Resolve cross-clear items: each clears its whole row (with shift)
    /// and its whole column. Runs before full-line detection because the
    /// row half of a cross overlaps it.
    pub fn clear_crosses_with_items(&mut self) -> (usize, ClearedRows) {
        let width = BOARD_WIDTH as usize;
        let mut crosses = 0;
        let mut rows = ClearedRows::new();
        let mut y = TOTAL_HEIGHT as usize;
        while y > 0 {
            y -= 1;
            let hit = (0..width)
                .find(|&x| self.items.get(&(y * width + x)) == Some(&ItemKind::CrossClear));
            if let Some(x) = hit {
                self.clear_row(y);
                self.clear_column(x);
                rows.push((y - rows.len()) as u8);
                crosses += 1;
                y += 1; // the shifted row may hold another cross
            }
        }
        (crosses, rows)
    }

    /// Sweep one-shot area-effect items. A weight clears a
    /// `WEIGHT_SPAN`-column strip from its row down to the floor; a bomb
    /// clears the square region around its cell. Trigger cells are
    /// removed with their regions.
    pub fn apply_weight_and_bomb_effects(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let triggers: Vec<(usize, ItemKind)> = self
            .items
            .iter()
            .filter(|(_, &item)| matches!(item, ItemKind::Weight | ItemKind::Bomb))
            .map(|(&idx, &item)| (idx, item))
            .collect();

        for &(idx, item) in &triggers {
            let x = (idx % width) as i8;
            let y = (idx / width) as i8;
            match item {
                ItemKind::Weight => {
                    let end_x = (x + WEIGHT_SPAN as i8 - 1).min(BOARD_WIDTH as i8 - 1);
                    self.clear_region(x, y, end_x, TOTAL_HEIGHT as i8 - 1);
                }
                ItemKind::Bomb => {
                    self.clear_region(
                        x - BOMB_RADIUS,
                        y - BOMB_RADIUS,
                        x + BOMB_RADIUS + 1,
                        y + BOMB_RADIUS + 1,
                    );
                }
                _ => unreachable!(),
            }
        }
        triggers.len()
    }

    /// Empty a rectangular region (clamped to the grid), cells and items
    fn clear_region(&mut self, min_x: i8, min_y: i8, max_x: i8, max_y: i8) {
        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(BOARD_WIDTH as i8 - 1);
        let max_y = max_y.min(TOTAL_HEIGHT as i8 - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let idx = (y as usize) * (BOARD_WIDTH as usize) + x as usize;
                self.cells[idx] = EMPTY_CELL;
                self.items.remove(&idx);
            }
        }
    }

    /// Game over when anything occupies the buffer zone
    pub fn is_game_over(&self) -> bool {
        let end = (BUFFER_ZONE as usize) * (BOARD_WIDTH as usize);
        self.cells[..end].iter().any(|&c| c != EMPTY_CELL)
    }

    /// The visible field, buffer zone excluded
    pub fn visible(&self) -> [[Cell; BOARD_WIDTH as usize]; crate::types::BOARD_HEIGHT as usize] {
        let width = BOARD_WIDTH as usize;
        let mut out = [[EMPTY_CELL; BOARD_WIDTH as usize]; crate::types::BOARD_HEIGHT as usize];
        for (row, slot) in out.iter_mut().enumerate() {
            let start = (row + BUFFER_ZONE as usize) * width;
            slot.copy_from_slice(&self.cells[start..start + width]);
        }
        out
    }

    /// Reset every cell and item
    pub fn clear(&mut self) {
        self.cells = [EMPTY_CELL; BOARD_SIZE];
        self.items.clear();
    }

    /// Fill an absolute row with one color, leaving the `gaps` columns empty
    pub fn fill_row(&mut self, y: i8, color: Cell, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                self.set_cell(x, y, color);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
