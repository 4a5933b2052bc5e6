//! Grid tests - bounds, collision and row compaction

use classic_tetris::core::Grid;
use classic_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "({}, {})", x, y);
        }
    }
    assert_eq!(grid.filled_count(), 0);
}

#[test]
fn test_grid_out_of_bounds_is_occupied() {
    let grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, BOARD_HEIGHT as i8), None);

    assert!(grid.is_occupied(-1, 5));
    assert!(grid.is_occupied(BOARD_WIDTH as i8, 5));
    assert!(grid.is_occupied(3, -1));
    assert!(grid.is_occupied(3, BOARD_HEIGHT as i8));
    assert!(!grid.is_occupied(3, 5));
}

#[test]
fn test_grid_set_out_of_bounds_is_rejected() {
    let mut grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert!(!grid.set(-1, 0, Some(PieceKind::T)));
    assert!(!grid.set(0, 22, Some(PieceKind::T)));
    assert_eq!(grid.filled_count(), 0);
}

#[test]
fn test_fits_checks_every_position() {
    let mut grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);
    grid.lock_cell(4, 10, PieceKind::S);

    assert!(grid.fits(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
    assert!(!grid.fits(&[(3, 10), (4, 10), (5, 10), (6, 10)]));
    assert!(!grid.fits(&[(8, 0), (9, 0), (10, 0), (11, 0)]));
}

#[test]
fn test_clear_full_rows_compacts_non_adjacent_rows() {
    let mut grid = Grid::from_rows(
        4,
        6,
        &[
            "O...", //
            "####", //
            ".T..", //
            "####", //
            "..Z.", //
        ],
    );

    assert_eq!(grid.full_row_count(), 2);
    assert_eq!(grid.clear_full_rows(), 2);

    // Survivors keep their relative order and sink to the bottom.
    assert_eq!(grid.get(2, 5), Some(Some(PieceKind::Z)));
    assert_eq!(grid.get(1, 4), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(0, 3), Some(Some(PieceKind::O)));
    for y in 0..3 {
        assert!(grid.row(y).unwrap().iter().all(Option::is_none));
    }
    assert_eq!(grid.filled_count(), 3);
}

#[test]
fn test_clear_full_rows_without_full_rows_is_noop() {
    let mut grid = Grid::from_rows(4, 4, &["#.##", ".###"]);
    let before = grid.clone();
    assert_eq!(grid.clear_full_rows(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_clear_everything() {
    let mut grid = Grid::from_rows(3, 3, &["###", "###", "###"]);
    assert_eq!(grid.clear_full_rows(), 3);
    assert_eq!(grid.filled_count(), 0);
    assert_eq!(grid.height(), 3);
}

#[test]
fn test_identities_are_written_row_major() {
    let grid = Grid::from_rows(3, 2, &["O..", "..Z"]);
    let mut out = vec![9; 1];
    grid.write_identities(&mut out);
    assert_eq!(out, vec![1, 0, 0, 0, 0, 7]);
}
