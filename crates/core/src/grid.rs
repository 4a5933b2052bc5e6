//! Grid module - the locked-block matrix
//!
//! The grid is a `width x height` matrix where each cell is empty or holds the
//! kind of piece that locked there. Storage is a flat row-major slice sized once
//! at construction; dimensions never change afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{Cell, PieceKind};

/// The locked-block grid using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Box<[Cell]>,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// Piece coordinates are `i8`, so cells past column or row 127 can never be
    /// reached; dimensions are normally capped by `EngineConfig::validate`.
    pub fn new(width: u8, height: u8) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; len].into_boxed_slice(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is blocked for a piece.
    ///
    /// Out-of-bounds positions count as occupied, so collision checks need no
    /// special casing at the walls or the floor.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        !self.is_occupied(x, y)
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height
    }

    /// True when every position is in bounds and empty
    pub fn fits(&self, positions: &[(i8, i8)]) -> bool {
        positions.iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Write a piece identity into one cell.
    ///
    /// The caller guarantees (x, y) is in bounds; the engine only locks cells
    /// of a collision-free active piece.
    pub fn lock_cell(&mut self, x: i8, y: i8, kind: PieceKind) {
        let written = self.set(x, y, Some(kind));
        debug_assert!(written, "lock_cell out of bounds: ({}, {})", x, y);
    }

    /// Row `y` as a slice, or None if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Number of full rows currently on the grid
    pub fn full_row_count(&self) -> usize {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .count()
    }

    /// Remove every full row in a single compaction pass and return how many
    /// were removed.
    ///
    /// Surviving rows keep their relative order and settle at the bottom; the
    /// vacated rows at the top become empty.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);

        cleared
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write the grid as identity bytes (0 = empty) into `out`, reusing its allocation.
    pub fn write_identities(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| cell.map(PieceKind::identity).unwrap_or(0)),
        );
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `.` is empty, a piece letter locks that kind, `#` locks an I cell.
    /// Rows shorter than the grid are padded with empty cells at the top.
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut grid = Self::new(width, height);
        let offset = (height as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Some(PieceKind::I),
                    c => PieceKind::from_str(&c.to_string()),
                };
                grid.set(x as i8, y, cell);
            }
        }
        grid
    }
}
