//! Piece module - a falling or held piece instance
//!
//! A `Piece` is the transform of one tetromino: kind, anchor, rotation,
//! plus the optional item payload and the shape/color overrides used by
//! special single-use pieces (weight, bomb). Instances are created at
//! spawn, mutated by move/rotate, copied into the board on lock, and then
//! discarded.

use crate::core::pieces::{
    get_shape, scan_index_of, spawn_position, special, MinoOffset, PieceShape,
};
use crate::types::{Cell, ItemKind, PieceKind, Rotation, GARBAGE_CELL};

/// A piece instance: transform plus item/special payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    /// Item payload: (block index relative to rotation Spawn, item kind)
    pub item: Option<(usize, ItemKind)>,
    /// Non-standard shape for special pieces; indexes the item directly
    pub shape_override: Option<PieceShape>,
    pub rotation_locked: bool,
    pub color_override: Option<Cell>,
}

impl Piece {
    /// Create a piece at the origin with spawn rotation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            x: 0,
            y: 0,
            rotation: Rotation::Spawn,
            item: None,
            shape_override: None,
            rotation_locked: false,
            color_override: None,
        }
    }

    /// Create a piece at its canonical spawn transform
    pub fn spawn(kind: PieceKind) -> Self {
        let mut piece = Self::new(kind);
        piece.reset_to_spawn();
        piece
    }

    /// Attach an item to the block with the given Spawn-rotation index
    pub fn with_item(mut self, spawn_index: usize, item: ItemKind) -> Self {
        self.item = Some((spawn_index, item));
        self
    }

    /// The weight special piece: a rotation-locked 4-wide bar whose item
    /// cell (leftmost block) anchors the crush strip
    pub fn weight() -> Self {
        let mut shape = [(0, 0); 4];
        shape.copy_from_slice(special::WEIGHT_SHAPE);
        Self {
            kind: PieceKind::I,
            x: 0,
            y: 0,
            rotation: Rotation::Spawn,
            item: Some((0, ItemKind::Weight)),
            shape_override: Some(shape),
            rotation_locked: true,
            color_override: Some(GARBAGE_CELL),
        }
    }

    /// The bomb special piece: a rotation-locked 2x2 block
    pub fn bomb() -> Self {
        let mut shape = [(0, 0); 4];
        shape.copy_from_slice(special::BOMB_SHAPE);
        Self {
            kind: PieceKind::O,
            x: 0,
            y: 0,
            rotation: Rotation::Spawn,
            item: Some((0, ItemKind::Bomb)),
            shape_override: Some(shape),
            rotation_locked: true,
            color_override: Some(GARBAGE_CELL),
        }
    }

    /// Whether this is a special single-use piece
    pub fn is_special(&self) -> bool {
        self.shape_override.is_some()
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        match self.shape_override {
            Some(shape) => shape,
            None => get_shape(self.kind, self.rotation),
        }
    }

    /// Absolute board cells occupied by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        let shape = self.shape();
        let mut out = [(0, 0); 4];
        for (slot, &(dx, dy)) in out.iter_mut().zip(shape.iter()) {
            *slot = (self.x + dx, self.y + dy);
        }
        out
    }

    /// Color code written to the board when the piece locks
    pub fn color(&self) -> Cell {
        self.color_override.unwrap_or_else(|| self.kind.color_index())
    }

    /// Current-rotation offset of the item-carrying mino, if any.
    ///
    /// For catalog pieces the Spawn-relative index is pushed through the
    /// remap table; override shapes never rotate, so their item index
    /// addresses the override directly.
    pub fn item_offset(&self) -> Option<(MinoOffset, ItemKind)> {
        let (spawn_index, item) = self.item?;
        let shape = self.shape();
        let scan = if self.shape_override.is_some() {
            spawn_index.min(shape.len() - 1)
        } else {
            scan_index_of(self.kind, self.rotation, spawn_index)
        };
        Some((shape[scan], item))
    }

    /// Item kind at the given shape-local offset (used when copying the
    /// piece into the board)
    pub fn item_at(&self, dx: i8, dy: i8) -> ItemKind {
        match self.item_offset() {
            Some(((ix, iy), item)) if (ix, iy) == (dx, dy) => item,
            _ => ItemKind::None,
        }
    }

    /// Copy with a translated anchor
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with a different rotation (same anchor)
    pub fn rotated(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }

    /// Move the piece back to its canonical spawn transform, keeping the
    /// item payload (a held piece re-enters play this way)
    pub fn reset_to_spawn(&mut self) {
        self.rotation = Rotation::Spawn;
        let shape = self.shape();
        let (x, y) = spawn_position(&shape);
        self.x = x;
        self.y = y;
    }
}
