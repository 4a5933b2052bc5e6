//! Pieces module - the piece catalog and pivot rotation
//!
//! Every kind is four integer offsets relative to a pivot cell. Rotation is a
//! quarter turn about that pivot, `(rx, ry) -> (-ry, rx)`, with no wall kicks:
//! a rotation that collides is simply refused by the caller.

use crate::types::PieceKind;

/// Offset of a single block relative to the pivot
pub type Offset = (i8, i8);

/// Shape of a piece - 4 block offsets from the pivot
pub type PieceShape = [Offset; 4];

/// Absolute grid positions of a piece's 4 blocks
pub type PieceCells = [(i8, i8); 4];

const O_SHAPE: PieceShape = [(0, 0), (0, 1), (1, 0), (1, 1)];
const I_SHAPE: PieceShape = [(0, -1), (0, 0), (0, 1), (0, 2)];
const T_SHAPE: PieceShape = [(0, -1), (0, 0), (1, 0), (-1, 0)];
const L_SHAPE: PieceShape = [(0, 0), (-1, 0), (1, 0), (1, 1)];
const J_SHAPE: PieceShape = [(0, 0), (-1, 0), (1, 0), (-1, 1)];
const S_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (-1, 1)];
const Z_SHAPE: PieceShape = [(0, 0), (-1, 0), (0, 1), (1, 1)];

/// Spawn orientation offsets for a kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::O => O_SHAPE,
        PieceKind::I => I_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Whether rotation changes this kind at all (the square never turns)
pub fn rotates(kind: PieceKind) -> bool {
    kind != PieceKind::O
}

/// Quarter turn clockwise about the pivot
pub fn rotate_cw(shape: &PieceShape) -> PieceShape {
    shape.map(|(rx, ry)| (-ry, rx))
}

/// Rotate offsets for `kind`; identity for the square
pub fn rotate_for(kind: PieceKind, shape: &PieceShape) -> PieceShape {
    if rotates(kind) {
        rotate_cw(shape)
    } else {
        *shape
    }
}

/// Offsets translated to absolute positions around `pivot`
pub fn place(shape: &PieceShape, pivot: (i8, i8)) -> PieceCells {
    shape.map(|(dx, dy)| (pivot.0 + dx, pivot.1 + dy))
}

/// Translate absolute positions by (dx, dy)
pub fn translate(cells: &PieceCells, dx: i8, dy: i8) -> PieceCells {
    cells.map(|(x, y)| (x + dx, y + dy))
}

/// Inclusive bounding box `(min_x, min_y, max_x, max_y)` of a set of offsets
pub fn bounds(shape: &PieceShape) -> (i8, i8, i8, i8) {
    shape.iter().fold(
        (i8::MAX, i8::MAX, i8::MIN, i8::MIN),
        |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    )
}

/// Spawn pivot for a grid of the given width: horizontal center, row 1
pub fn spawn_pivot(width: u8) -> (i8, i8) {
    ((width / 2) as i8, crate::types::SPAWN_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_includes_its_pivot() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert!(shape.contains(&(0, 0)), "{:?} should include its pivot", kind);
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for kind in PieceKind::ALL {
            let start = get_shape(kind);
            let mut shape = start;
            for _ in 0..4 {
                shape = rotate_for(kind, &shape);
            }
            assert_eq!(shape, start, "{:?}", kind);
        }
    }

    #[test]
    fn square_never_turns() {
        let o = get_shape(PieceKind::O);
        assert_eq!(rotate_for(PieceKind::O, &o), o);
        assert!(!rotates(PieceKind::O));
    }

    #[test]
    fn vertical_line_turns_horizontal() {
        let turned = rotate_cw(&get_shape(PieceKind::I));
        assert_eq!(turned, [(1, 0), (0, 0), (-1, 0), (-2, 0)]);
    }

    #[test]
    fn bounds_of_line() {
        assert_eq!(bounds(&get_shape(PieceKind::I)), (0, -1, 0, 2));
    }

    #[test]
    fn spawn_is_centered() {
        assert_eq!(spawn_pivot(10), (5, 1));
        assert_eq!(spawn_pivot(7), (3, 1));
    }
}
