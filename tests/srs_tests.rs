//! Rotation system integration tests - SRS kicks, T-spins, movement

use duel_tetris::core::piece::Piece;
use duel_tetris::core::pieces::{block_index_remap, get_shape, spawn_position};
use duel_tetris::core::srs::{attempt_rotation, hard_drop, is_t_spin, move_down, move_left, move_right};
use duel_tetris::core::Board;
use duel_tetris::types::{PieceKind, Rotation, TOTAL_HEIGHT};

const BOTTOM: i8 = TOTAL_HEIGHT as i8 - 1;

const ROTATIONS: [Rotation; 4] = [
    Rotation::Spawn,
    Rotation::Right,
    Rotation::Reverse,
    Rotation::Left,
];

#[test]
fn test_catalog_shapes_match_srs() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::Spawn),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::Right),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::Spawn),
        [(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::O, Rotation::Reverse),
        get_shape(PieceKind::O, Rotation::Spawn)
    );
}

#[test]
fn test_spawn_positions_per_kind() {
    // Horizontal centering over the occupied extent, bottom edge on the
    // last hidden row: the I's minos cover columns 3..=6 of row 3
    let (x, y) = spawn_position(&get_shape(PieceKind::I, Rotation::Spawn));
    let piece = Piece {
        x,
        y,
        ..Piece::new(PieceKind::I)
    };
    let cells = piece.cells();
    for expected in [(3, 3), (4, 3), (5, 3), (6, 3)] {
        assert!(cells.contains(&expected), "missing {:?}", expected);
    }
}

#[test]
fn test_four_cw_rotations_restore_everything() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let start = Piece {
            x: 3,
            y: 10,
            ..Piece::new(kind)
        };
        let mut piece = start;
        for _ in 0..4 {
            let outcome = attempt_rotation(&piece, &board, true)
                .unwrap_or_else(|| panic!("{:?} blocked on empty board", kind));
            piece = outcome.piece;
        }
        assert_eq!(piece.rotation, start.rotation);
        assert_eq!((piece.x, piece.y), (start.x, start.y), "{:?} drifted", kind);
    }
}

#[test]
fn test_unobstructed_kick_is_identity_offset() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let piece = Piece {
            x: 3,
            y: 10,
            ..Piece::new(kind)
        };
        let outcome = attempt_rotation(&piece, &board, true).unwrap();
        assert_eq!(outcome.kick_index, 0, "{:?}", kind);
        assert!(!outcome.t_spin);
    }
}

#[test]
fn test_t_flush_right_kicks_one_left() {
    // T jammed so far right its unshifted target would cross the wall:
    // the first wall kick (-1, 0) resolves to x = 7, rotation Right
    let board = Board::new();
    let piece = Piece {
        x: 8,
        y: 10,
        ..Piece::new(PieceKind::T)
    };
    let outcome = attempt_rotation(&piece, &board, true).expect("kick must fit");
    assert_eq!(outcome.piece.x, 7);
    assert_eq!(outcome.piece.y, 10);
    assert_eq!(outcome.piece.rotation, Rotation::Right);
    assert_eq!(outcome.kick_index, 1);
}

#[test]
fn test_o_piece_all_transitions_no_drift() {
    let board = Board::new();
    for clockwise in [true, false] {
        let mut piece = Piece {
            x: 4,
            y: 12,
            ..Piece::new(PieceKind::O)
        };
        for _ in 0..4 {
            let before = (piece.x, piece.y);
            let outcome = attempt_rotation(&piece, &board, clockwise).expect("o always rotates");
            assert_eq!((outcome.piece.x, outcome.piece.y), before);
            piece = outcome.piece;
        }
        assert_eq!(piece.rotation, Rotation::Spawn);
    }
}

#[test]
fn test_fully_enclosed_t_cannot_rotate() {
    let mut board = Board::new();
    let piece = Piece {
        x: 4,
        y: 10,
        ..Piece::new(PieceKind::T)
    };
    let free = piece.cells();
    for y in 6..16 {
        for x in 0..10 {
            if !free.contains(&(x, y)) {
                board.set_cell(x, y, 2);
            }
        }
    }
    assert!(board.is_valid_position(&piece));
    assert!(attempt_rotation(&piece, &board, true).is_none());
    assert!(attempt_rotation(&piece, &board, false).is_none());
}

#[test]
fn test_ccw_negates_cw_kick_offsets() {
    // Rotating into and back out of the same transition must round-trip
    // anywhere on an empty board
    let board = Board::new();
    for kind in [PieceKind::J, PieceKind::S, PieceKind::I] {
        for rotation in ROTATIONS {
            let piece = Piece {
                x: 4,
                y: 10,
                rotation,
                ..Piece::new(kind)
            };
            let there = attempt_rotation(&piece, &board, true).unwrap().piece;
            let back = attempt_rotation(&there, &board, false).unwrap().piece;
            assert_eq!(back, piece, "{:?} from {:?}", kind, rotation);
        }
    }
}

#[test]
fn test_movement_rejection_keeps_piece_unchanged() {
    let board = Board::new();
    let piece = Piece {
        x: 0,
        y: 10,
        ..Piece::new(PieceKind::J)
    };
    assert!(move_left(&piece, &board).is_none());
    // The refused move is a pure "no": the original piece still validates
    assert!(board.is_valid_position(&piece));
    assert_eq!(move_right(&piece, &board).unwrap().x, 1);
}

#[test]
fn test_hard_drop_never_locks() {
    let board = Board::new();
    let piece = Piece::spawn(PieceKind::S);
    let resting = hard_drop(&piece, &board);
    assert!(move_down(&resting, &board).is_none());
    // The board itself is untouched
    for y in 0..TOTAL_HEIGHT as i8 {
        for x in 0..10 {
            assert_eq!(board.cell(x, y), 0);
        }
    }
}

#[test]
fn test_t_spin_slot_detection() {
    let mut board = Board::new();
    board.fill_row(BOTTOM, 1, &[4]);
    board.fill_row(BOTTOM - 1, 1, &[3, 4, 5]);
    board.set_cell(3, BOTTOM - 2, 1);

    let wedged = Piece {
        x: 3,
        y: BOTTOM - 2,
        rotation: Rotation::Reverse,
        ..Piece::new(PieceKind::T)
    };
    assert!(board.is_valid_position(&wedged));
    assert!(is_t_spin(&wedged, &board));

    // The same shape out in the open is no spin
    let open = Piece {
        x: 3,
        y: 8,
        rotation: Rotation::Reverse,
        ..Piece::new(PieceKind::T)
    };
    assert!(!is_t_spin(&open, &board));
}

#[test]
fn test_remap_follows_rotation_geometry() {
    // The remap table must agree with the shapes: rotating the grid
    // clockwise maps a 3x3 cell (r, c) to (c, 2 - r), and the I piece's
    // 4x4 cell to (c, 3 - r)
    for kind in PieceKind::ALL {
        if kind == PieceKind::O {
            continue; // O keeps its cells; identity geometry
        }
        let size = if kind == PieceKind::I { 4 } else { 3 };
        let spawn = get_shape(kind, Rotation::Spawn);
        let right = get_shape(kind, Rotation::Right);
        let remap = block_index_remap(kind, Rotation::Right);
        for (scan, &(dx, dy)) in right.iter().enumerate() {
            let spawn_index = remap[scan];
            let (sx, sy) = spawn[spawn_index];
            // (sx, sy) rotated clockwise lands at (size - 1 - sy, sx)
            assert_eq!(
                (dx, dy),
                (size - 1 - sy, sx),
                "{:?} scan {} mismatch",
                kind,
                scan
            );
        }
    }
}
