//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::{self, PieceCells};
use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{EngineState, PieceKind};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';
const SHADOW: char = '░';
const EMPTY_DOT: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the bordered board lands inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardLayout {
        let frame_w = (snap.width as u16) * self.cell_w + 2;
        let frame_h = (snap.height as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of the top-left column of board cell (x, y)
    pub fn cell_origin(&self, layout: BoardLayout, x: u16, y: u16) -> (u16, u16) {
        (
            layout.start_x + 1 + x * self.cell_w,
            layout.start_y + 1 + y * self.cell_h,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::blank(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG)));

        let layout = self.layout(snap, viewport);
        let board_px_w = layout.frame_w - 2;
        let board_px_h = layout.frame_h - 2;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill(
            layout.start_x + 1,
            layout.start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            bg,
        );
        self.draw_border(fb, layout, border);

        // Locked cells.
        for y in 0..snap.height as u16 {
            for x in 0..snap.width as u16 {
                match snap.cell(x as u8, y as u8) {
                    Some(kind) => self.draw_board_cell(fb, layout, x, y, kind),
                    None => self.draw_empty_cell(fb, layout, x, y),
                }
            }
        }

        if let (Some(active), Some(shadow)) = (snap.active, snap.shadow) {
            let style = CellStyle::new(active.kind.color().scaled(60), BOARD_BG).dim();
            self.draw_cells(fb, layout, snap, &shadow, SHADOW, style);
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(active.kind.color(), BOARD_BG).bold();
            self.draw_cells(fb, layout, snap, &active.cells, BLOCK, style);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.state {
            EngineState::Idle => self.draw_overlay_text(fb, layout, "PRESS ENTER"),
            EngineState::Paused => self.draw_overlay_text(fb, layout, "PAUSED"),
            EngineState::GameOver => self.draw_overlay_text(fb, layout, "GAME OVER"),
            EngineState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
        let BoardLayout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, EMPTY_DOT, style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(kind.color(), BOARD_BG);
        self.fill_cell_rect(fb, layout, x, y, BLOCK, style);
    }

    fn draw_cells(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        snap: &GameSnapshot,
        cells: &PieceCells,
        ch: char,
        style: CellStyle,
    ) {
        for &(x, y) in cells {
            if x >= 0 && y >= 0 && (x as u8) < snap.width && (y as u8) < snap.height {
                self.fill_cell_rect(fb, layout, x as u16, y as u16, ch, style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(layout, cell_x, cell_y);
        fb.fill(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("ROWS", snap.rows_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, number, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next);
    }

    /// Next piece in spawn orientation, normalized to its bounding box
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = pieces::get_shape(kind);
        let (min_x, min_y, _, _) = pieces::bounds(&shape);
        let style = CellStyle::new(kind.color(), PANEL_BG);
        for (dx, dy) in shape {
            let cx = (dx - min_x) as u16;
            let cy = (dy - min_y) as u16;
            fb.fill(
                x + cx * self.cell_w,
                y + cy * self.cell_h,
                self.cell_w,
                self.cell_h,
                BLOCK,
                style,
            );
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: BoardLayout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;

    fn running_snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot {
            state: EngineState::Running,
            ..GameSnapshot::default()
        };
        snap.cells[21 * 10] = PieceKind::Z.identity();
        snap
    }

    fn find_row(fb: &FrameBuffer, needle: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn draws_locked_cells_two_columns_wide() {
        let view = GameView::default();
        let snap = running_snapshot();
        let viewport = Viewport::new(60, 26);
        let fb = view.render(&snap, viewport);

        let layout = view.layout(&snap, viewport);
        let (px, py) = view.cell_origin(layout, 0, 21);
        for dx in 0..2 {
            let cell = fb.get(px + dx, py).unwrap();
            assert_eq!(cell.ch, BLOCK);
            assert_eq!(cell.style.fg, PieceKind::Z.color());
        }
        assert_eq!(fb.get(px + 2, py).map(|c| c.ch), Some(EMPTY_DOT));
    }

    #[test]
    fn active_piece_covers_its_shadow() {
        let view = GameView::default();
        let mut snap = running_snapshot();
        let piece = [(5, 0), (5, 1), (5, 2), (5, 3)];
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            pivot: (5, 1),
            cells: piece,
        });
        snap.shadow = Some([(5, 18), (5, 19), (5, 20), (5, 21)]);

        let viewport = Viewport::new(60, 26);
        let fb = view.render(&snap, viewport);
        let layout = view.layout(&snap, viewport);

        let (sx, sy) = view.cell_origin(layout, 5, 20);
        assert_eq!(fb.get(sx, sy).map(|c| c.ch), Some(SHADOW));
        let (ax, ay) = view.cell_origin(layout, 5, 2);
        assert_eq!(fb.get(ax, ay).map(|c| c.ch), Some(BLOCK));
    }

    #[test]
    fn side_panel_shows_counters() {
        let view = GameView::default();
        let snap = GameSnapshot {
            score: 160,
            level: 3,
            rows_cleared: 34,
            ..running_snapshot()
        };
        let fb = view.render(&snap, Viewport::new(60, 26));

        let score_row = find_row(&fb, "SCORE").expect("score label");
        assert!(fb.row_text(score_row + 1).contains("160"));
        let rows_row = find_row(&fb, "ROWS").expect("rows label");
        assert!(fb.row_text(rows_row + 1).contains("34"));
        assert!(find_row(&fb, "NEXT").is_some());
    }

    #[test]
    fn overlays_follow_state() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 26);

        let idle = GameSnapshot::default();
        assert!(find_row(&view.render(&idle, viewport), "PRESS ENTER").is_some());

        let paused = GameSnapshot {
            state: EngineState::Paused,
            ..GameSnapshot::default()
        };
        assert!(find_row(&view.render(&paused, viewport), "PAUSED").is_some());

        let over = GameSnapshot {
            state: EngineState::GameOver,
            ..GameSnapshot::default()
        };
        assert!(find_row(&view.render(&over, viewport), "GAME OVER").is_some());

        let running = running_snapshot();
        let fb = view.render(&running, viewport);
        assert!(find_row(&fb, "PAUSED").is_none());
        assert!(find_row(&fb, "GAME OVER").is_none());
    }

    #[test]
    fn tall_board_fits_runtime_height() {
        let view = GameView::default();
        let snap = GameSnapshot {
            height: 30,
            cells: vec![0; 300],
            ..GameSnapshot::default()
        };
        let viewport = Viewport::new(60, 34);
        let layout = view.layout(&snap, viewport);
        assert_eq!(layout.frame_h, 32);
        assert_eq!(layout.frame_w, 22);

        let fb = view.render(&snap, viewport);
        assert_eq!(fb.get(layout.start_x, layout.start_y + 31).map(|c| c.ch), Some('└'));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&running_snapshot(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
