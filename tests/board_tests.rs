//! Board integration tests - grid semantics, clearing, item effects

use duel_tetris::core::piece::Piece;
use duel_tetris::core::Board;
use duel_tetris::types::{
    ItemKind, PieceKind, Rotation, BOARD_WIDTH, BUFFER_ZONE, EMPTY_CELL, TOTAL_HEIGHT,
};

const BOTTOM: i8 = TOTAL_HEIGHT as i8 - 1;

#[test]
fn test_every_spawn_position_valid_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert!(board.is_valid_position(&piece), "{:?} spawn invalid", kind);
    }
}

#[test]
fn test_walls_and_floor_bound_positions() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);

    piece.x = -1;
    assert!(!board.is_valid_position(&piece));
    piece.x = BOARD_WIDTH as i8 - 3;
    assert!(!board.is_valid_position(&piece));
    piece.x = 3;
    piece.y = TOTAL_HEIGHT as i8;
    assert!(!board.is_valid_position(&piece));
}

#[test]
fn test_piece_may_extend_above_stored_grid() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::T);
    piece.y = -2;
    assert!(board.is_valid_position(&piece));
}

#[test]
fn test_collision_with_locked_cells() {
    let mut board = Board::new();
    let mut piece = Piece::spawn(PieceKind::O);
    piece.y = 10;
    board.set_cell(5, 11, 3);
    assert!(!board.is_valid_position(&piece));
    board.set_cell(5, 11, EMPTY_CELL);
    assert!(board.is_valid_position(&piece));
}

#[test]
fn test_place_writes_piece_color() {
    let mut board = Board::new();
    let piece = Piece {
        x: 0,
        y: BOTTOM - 1,
        ..Piece::new(PieceKind::J)
    };
    board.place(&piece);
    for (x, y) in piece.cells() {
        assert_eq!(board.cell(x, y), PieceKind::J.color_index());
    }
}

#[test]
fn test_single_full_row_clears_and_shifts() {
    let mut board = Board::new();
    board.fill_row(BOTTOM, 2, &[]);
    // A marker two rows up to watch the shift
    board.set_cell(7, BOTTOM - 2, 5);

    let cleared = board.clear_full_lines();
    assert_eq!(cleared.len(), 1);
    assert_eq!(board.cell(7, BOTTOM - 1), 5);
    assert_eq!(board.cell(7, BOTTOM - 2), EMPTY_CELL);
    // Top row ended up empty
    for x in 0..BOARD_WIDTH as i8 {
        assert_eq!(board.cell(x, 0), EMPTY_CELL);
    }
}

#[test]
fn test_stacked_full_rows_cascade() {
    let mut board = Board::new();
    for y in (BOTTOM - 3)..=BOTTOM {
        board.fill_row(y, 1, &[]);
    }
    let cleared = board.clear_full_lines();
    assert_eq!(cleared.len(), 4);
    for y in (BOTTOM - 3)..=BOTTOM {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.cell(x, y), EMPTY_CELL);
        }
    }
}

#[test]
fn test_game_over_only_from_buffer_zone() {
    let mut board = Board::new();
    for y in BUFFER_ZONE as i8..TOTAL_HEIGHT as i8 {
        board.set_cell(0, y, 4);
    }
    assert!(!board.is_game_over());
    board.set_cell(0, BUFFER_ZONE as i8 - 1, 4);
    assert!(board.is_game_over());
}

#[test]
fn test_item_survives_row_shift_above_clear() {
    let mut board = Board::new();
    board.fill_row(BOTTOM, 2, &[]);
    board.set_cell(3, BOTTOM - 1, 6);
    board.set_item(3, BOTTOM - 1, ItemKind::ColumnClear);

    board.clear_full_lines();
    // The item rode its cell down one row
    assert_eq!(board.item_at(3, BOTTOM), ItemKind::ColumnClear);
    assert_eq!(board.item_at(3, BOTTOM - 1), ItemKind::None);
}

#[test]
fn test_line_item_clears_partial_row() {
    let mut board = Board::new();
    let piece = Piece {
        x: 0,
        y: BOTTOM - 1,
        ..Piece::new(PieceKind::I).with_item(2, ItemKind::LineClear)
    };
    // I north occupies dy = 1, so the minos land on the bottom row
    board.place(&piece);
    assert_eq!(board.item_at(2, BOTTOM), ItemKind::LineClear);

    let outcome = board.clear_lines_with_items();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.item_triggered, 1);
    for x in 0..4 {
        assert_eq!(board.cell(x, BOTTOM), EMPTY_CELL);
    }
}

#[test]
fn test_full_row_with_line_item_counts_as_normal() {
    let mut board = Board::new();
    board.fill_row(BOTTOM, 3, &[]);
    board.set_item(5, BOTTOM, ItemKind::LineClear);
    let outcome = board.clear_lines_with_items();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.item_triggered, 0);
}

#[test]
fn test_column_item_empties_column() {
    let mut board = Board::new();
    for y in (BOTTOM - 5)..=BOTTOM {
        board.set_cell(6, y, 2);
    }
    board.set_item(6, BOTTOM - 2, ItemKind::ColumnClear);

    assert_eq!(board.clear_columns_with_items(), 1);
    for y in BUFFER_ZONE as i8..=BOTTOM {
        assert_eq!(board.cell(6, y), EMPTY_CELL);
    }
}

#[test]
fn test_cross_item_resolves_before_full_lines() {
    // A cross on an otherwise-full row: the cross consumes the row, so
    // the line pass afterwards finds nothing left to clear
    let mut board = Board::new();
    board.fill_row(BOTTOM, 4, &[]);
    board.set_item(2, BOTTOM, ItemKind::CrossClear);

    let (crosses, rows) = board.clear_crosses_with_items();
    assert_eq!(crosses, 1);
    assert_eq!(rows.len(), 1);
    let outcome = board.clear_lines_with_items();
    assert!(outcome.rows.is_empty());
}

#[test]
fn test_weight_strip_spans_four_columns() {
    let mut board = Board::new();
    for y in (BOTTOM - 2)..=BOTTOM {
        board.fill_row(y, 5, &[0]);
    }
    board.set_item(4, BOTTOM - 2, ItemKind::Weight);

    board.apply_weight_and_bomb_effects();
    for y in (BOTTOM - 2)..=BOTTOM {
        for x in 4..8 {
            assert_eq!(board.cell(x, y), EMPTY_CELL);
        }
        assert_eq!(board.cell(3, y), 5);
        assert_eq!(board.cell(8, y), 5);
    }
}

#[test]
fn test_weight_strip_clamps_at_wall() {
    let mut board = Board::new();
    board.fill_row(BOTTOM, 5, &[0]);
    board.set_item(8, BOTTOM, ItemKind::Weight);
    board.apply_weight_and_bomb_effects();
    assert_eq!(board.cell(8, BOTTOM), EMPTY_CELL);
    assert_eq!(board.cell(9, BOTTOM), EMPTY_CELL);
    assert_eq!(board.cell(7, BOTTOM), 5);
}

#[test]
fn test_rotation_positions_follow_catalog() {
    // A sanity pass over the catalog: every rotation of every kind keeps
    // four in-bounds cells when centered on an empty board
    let board = Board::new();
    for kind in PieceKind::ALL {
        for rotation in [
            Rotation::Spawn,
            Rotation::Right,
            Rotation::Reverse,
            Rotation::Left,
        ] {
            let piece = Piece {
                x: 3,
                y: 10,
                rotation,
                ..Piece::new(kind)
            };
            assert!(board.is_valid_position(&piece), "{:?} {:?}", kind, rotation);
        }
    }
}
