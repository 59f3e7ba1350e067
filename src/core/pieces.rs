//! Pieces module - the tetromino catalog
//!
//! Static shape tables (SRS bounding-box convention), color identity, and
//! the block-index remap tables that keep an attached item on the same
//! physical mino across rotations.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation, BOARD_WIDTH, BUFFER_ZONE};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets in row-major scan order
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes (4x4 box)
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::Right => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::Reverse => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::Left => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece occupies the same cells in every rotation; only the block
/// identities permute (see the remap table)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes (3x3 box)
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::Right => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::Left => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::Right => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::Reverse => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::Left => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::Right => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::Reverse => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::Left => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::Right => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::Left => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::Spawn => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::Right => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::Left => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Block-index remap tables, indexed `[kind][rotation][scan_index]`.
///
/// Entry `REMAP[k][r][i]` gives the Spawn-rotation index of the physical
/// mino that appears at scan position `i` in rotation `r`. An item stored
/// against a Spawn index can therefore be located in any rotation by
/// searching the rotation's row for that index.
const BLOCK_INDEX_REMAP: [[[usize; 4]; 4]; 7] = [
    // I
    [[0, 1, 2, 3], [0, 1, 2, 3], [3, 2, 1, 0], [3, 2, 1, 0]],
    // O
    [[0, 1, 2, 3], [2, 0, 3, 1], [3, 2, 1, 0], [1, 3, 0, 2]],
    // T
    [[0, 1, 2, 3], [1, 2, 0, 3], [3, 2, 1, 0], [3, 0, 2, 1]],
    // S
    [[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]],
    // Z
    [[0, 1, 2, 3], [0, 2, 1, 3], [3, 2, 1, 0], [3, 1, 2, 0]],
    // J
    [[0, 1, 2, 3], [1, 0, 2, 3], [3, 2, 1, 0], [3, 2, 0, 1]],
    // L
    [[0, 1, 2, 3], [1, 2, 3, 0], [3, 2, 1, 0], [0, 3, 2, 1]],
];

/// Remap row for a kind and rotation
pub fn block_index_remap(kind: PieceKind, rotation: Rotation) -> [usize; 4] {
    BLOCK_INDEX_REMAP[kind.index()][rotation.index()]
}

/// Scan position (in the given rotation) of the mino whose Spawn-rotation
/// index is `spawn_index`
pub fn scan_index_of(kind: PieceKind, rotation: Rotation, spawn_index: usize) -> usize {
    let row = block_index_remap(kind, rotation);
    row.iter().position(|&s| s == spawn_index).unwrap_or(0)
}

/// Occupied extent of a shape: (min_dx, max_dx, min_dy, max_dy)
pub fn shape_extent(shape: &[MinoOffset]) -> (i8, i8, i8, i8) {
    let mut min_dx = i8::MAX;
    let mut max_dx = i8::MIN;
    let mut min_dy = i8::MAX;
    let mut max_dy = i8::MIN;
    for &(dx, dy) in shape {
        min_dx = min_dx.min(dx);
        max_dx = max_dx.max(dx);
        min_dy = min_dy.min(dy);
        max_dy = max_dy.max(dy);
    }
    (min_dx, max_dx, min_dy, max_dy)
}

/// Spawn anchor for a shape: centered horizontally over the occupied
/// extent, bottom occupied row on the last buffer row
pub fn spawn_position(shape: &[MinoOffset]) -> (i8, i8) {
    let (min_dx, max_dx, _, max_dy) = shape_extent(shape);
    let width = max_dx - min_dx + 1;
    let x = (BOARD_WIDTH as i8 - width) / 2 - min_dx;
    let y = (BUFFER_ZONE as i8 - 1) - max_dy;
    (x, y)
}

/// Special single-use piece shapes (non-standard, rotation-locked)
pub mod special {
    use super::MinoOffset;

    /// Weight: a flat 4-wide bar that crushes everything beneath it
    pub const WEIGHT_SHAPE: &[MinoOffset] = &[(0, 0), (1, 0), (2, 0), (3, 0)];
    /// Bomb: a 2x2 block that detonates where it lands
    pub const BOMB_SHAPE: &[MinoOffset] = &[(0, 0), (1, 0), (0, 1), (1, 1)];
}
