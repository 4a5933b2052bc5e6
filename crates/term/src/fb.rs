//! Styled character grid that the game view draws into and the renderer
//! flushes.

pub use crate::types::Rgb;

/// Colors and attributes of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Same attributes, so switching between the two only needs new colors
    pub fn same_attributes(&self, other: &CellStyle) -> bool {
        self.bold == other.bold && self.dim == other.dim
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    pub const fn blank(style: CellStyle) -> Self {
        Self::new(' ', style)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

/// Row-major grid of terminal cells. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions in place; the backing `Vec` only grows.
    ///
    /// Cell contents are unspecified afterwards, callers redraw everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Tail of row `y` starting at column `x`
    fn row_from_mut(&mut self, x: u16, y: u16) -> Option<&mut [Cell]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        Some(&mut self.cells[start + x as usize..end])
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(slot) = self.row_from_mut(x, y).and_then(|row| row.first_mut()) {
            *slot = Cell::new(ch, style);
        }
    }

    /// One cell per `char`, clipped at the right edge
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        if let Some(row) = self.row_from_mut(x, y) {
            for (slot, ch) in row.iter_mut().zip(s.chars()) {
                *slot = Cell::new(ch, style);
            }
        }
    }

    /// Write a decimal number without going through a `String`.
    pub fn put_u32(&mut self, x: u16, y: u16, mut value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut len = 0;
        loop {
            digits[len] = b'0' + (value % 10) as u8;
            len += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        if let Some(row) = self.row_from_mut(x, y) {
            for (slot, d) in row.iter_mut().zip(digits[..len].iter().rev()) {
                *slot = Cell::new(*d as char, style);
            }
        }
    }

    /// Fill a `w x h` block with `ch`, clipped to the buffer
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let bottom = y.saturating_add(h).min(self.height);
        for row_y in y..bottom {
            if let Some(row) = self.row_from_mut(x, row_y) {
                let n = (w as usize).min(row.len());
                row[..n].fill(Cell::new(ch, style));
            }
        }
    }

    pub fn contains_char(&self, ch: char) -> bool {
        self.cells.iter().any(|cell| cell.ch == ch)
    }

    /// Row `y` as text, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }
}
