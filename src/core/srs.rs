//! Super Rotation System - wall kicks, rotation search, T-spin detection
//!
//! Two kick tables (I and the shared J/L/S/T/Z table), each indexed by the
//! clockwise transition. Counter-clockwise rotations reuse the reverse
//! transition's clockwise row with both offset components negated, which
//! reproduces the full 8-row SRS data from half the constants.
//! Offsets are in screen coordinates (y grows downward).
//! Reference: https://tetris.wiki/SRS

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::types::{PieceKind, Rotation, EMPTY_CELL};

/// One kick row: five candidate offsets, (0,0) always first
type KickRow = [(i8, i8); 5];

/// Kicks for J, L, S, T, Z by clockwise transition
/// (rows: Spawn->Right, Right->Reverse, Reverse->Left, Left->Spawn)
const JLSTZ_KICKS: [KickRow; 4] = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// The I piece uses its own kick data
const I_KICKS: [KickRow; 4] = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Result of a successful rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationOutcome {
    pub piece: Piece,
    /// Which kick candidate was applied (0 = unshifted)
    pub kick_index: usize,
    /// T piece rotated into a confined slot via a wall kick
    pub t_spin: bool,
}

/// Try to rotate a piece with SRS wall kicks.
///
/// Returns the rotated piece, the kick used, and the T-spin flag; `None`
/// when no candidate fits. The input piece is never modified, so a failed
/// rotation is observable only as the `None`.
pub fn attempt_rotation(piece: &Piece, board: &Board, clockwise: bool) -> Option<RotationOutcome> {
    if piece.rotation_locked {
        return None;
    }

    let target = if clockwise {
        piece.rotation.cw()
    } else {
        piece.rotation.ccw()
    };

    // The O piece needs no kicks, but the rotation index still changes so
    // an attached item keeps tracking its physical block
    if piece.kind == PieceKind::O {
        let candidate = piece.rotated(target);
        if board.is_valid_position(&candidate) {
            return Some(RotationOutcome {
                piece: candidate,
                kick_index: 0,
                t_spin: false,
            });
        }
        return None;
    }

    let table = if piece.kind == PieceKind::I {
        &I_KICKS
    } else {
        &JLSTZ_KICKS
    };
    // Clockwise: the transition leaving the current rotation. Counter-
    // clockwise: the clockwise row of the transition being undone.
    let row = if clockwise {
        piece.rotation.index()
    } else {
        (piece.rotation.index() + 3) % 4
    };

    for (kick_index, &(dx, dy)) in table[row].iter().enumerate() {
        let (dx, dy) = if clockwise { (dx, dy) } else { (-dx, -dy) };
        let candidate = piece.rotated(target).translated(dx, dy);
        if board.is_valid_position(&candidate) {
            let t_spin =
                piece.kind == PieceKind::T && kick_index > 0 && is_t_spin(&candidate, board);
            return Some(RotationOutcome {
                piece: candidate,
                kick_index,
                t_spin,
            });
        }
    }

    None
}

/// T-spin corner test around the T piece's 3x3 center.
///
/// At least three of the four diagonal corners must be filled, including
/// both corners on the side the T points toward. Corner probes outside
/// the stored grid read as empty, so wall-adjacent spins under-detect;
/// this matches the behavior the scoring was tuned against.
pub fn is_t_spin(piece: &Piece, board: &Board) -> bool {
    if piece.kind != PieceKind::T {
        return false;
    }

    let corners = [
        (piece.x, piece.y),         // top-left
        (piece.x + 2, piece.y),     // top-right
        (piece.x, piece.y + 2),     // bottom-left
        (piece.x + 2, piece.y + 2), // bottom-right
    ];
    let filled: Vec<bool> = corners
        .iter()
        .map(|&(x, y)| board.cell(x, y) != EMPTY_CELL)
        .collect();

    if filled.iter().filter(|&&f| f).count() < 3 {
        return false;
    }

    let (a, b) = match piece.rotation {
        Rotation::Spawn => (0, 1),   // points up
        Rotation::Right => (1, 3),   // points right
        Rotation::Reverse => (2, 3), // points down
        Rotation::Left => (0, 2),    // points left
    };
    filled[a] && filled[b]
}

/// One step left; `None` when blocked
pub fn move_left(piece: &Piece, board: &Board) -> Option<Piece> {
    let candidate = piece.translated(-1, 0);
    board.is_valid_position(&candidate).then_some(candidate)
}

/// One step right; `None` when blocked
pub fn move_right(piece: &Piece, board: &Board) -> Option<Piece> {
    let candidate = piece.translated(1, 0);
    board.is_valid_position(&candidate).then_some(candidate)
}

/// One step down; `None` when resting on the floor or the stack
pub fn move_down(piece: &Piece, board: &Board) -> Option<Piece> {
    let candidate = piece.translated(0, 1);
    board.is_valid_position(&candidate).then_some(candidate)
}

/// Drop to the resting position without locking (locking is the engine's
/// job; this also computes the ghost piece)
pub fn hard_drop(piece: &Piece, board: &Board) -> Piece {
    let mut resting = *piece;
    while let Some(next) = move_down(&resting, board) {
        resting = next;
    }
    resting
}
