//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are compared row by row against the previous one. A row that
//! changed is rewritten from its first to its last differing column with a
//! single cursor move; the first frame and any frame after a resize or
//! [`TerminalRenderer::invalidate`] repaint every row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns stdout while the game runs; call [`TerminalRenderer::exit`] before
/// dropping it to restore the terminal.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call on every exit path.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        Pen::default().release(&mut self.buf)?;
        self.buf
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// Afterwards `fb` holds stale contents of the right size; the game view
    /// clears it before drawing the next frame, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) => {
                encode_frame(Some(&prev), fb, &mut self.buf)?;
                prev
            }
            None => {
                encode_frame(None, fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// Without a previous frame of the same size the screen is cleared and every
/// row is written. Returns how many rows were written; nothing at all is
/// queued when no row changed.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<u16> {
    let prev = prev.filter(|p| p.same_size(next));
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    let mut rows = 0;
    for y in 0..next.height() {
        let Some(row) = next.row(y) else { break };
        let span = match prev.and_then(|p| p.row(y)) {
            Some(old) => changed_span(old, row),
            None => Some((0, row.len())),
        };
        if let Some((start, end)) = span {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for cell in &row[start..end] {
                pen.switch(out, cell.style)?;
                out.queue(Print(cell.ch))?;
            }
            rows += 1;
        }
    }

    if rows > 0 {
        pen.release(out)?;
    }
    Ok(rows)
}

/// Columns `[start, end)` covering every difference between two rows of equal
/// length, or None when they match.
fn changed_span(old: &[Cell], new: &[Cell]) -> Option<(usize, usize)> {
    let first = old.iter().zip(new).position(|(a, b)| a != b)?;
    let last = old.iter().zip(new).rposition(|(a, b)| a != b)?;
    Some((first, last + 1))
}

/// Tracks the style last sent to the terminal so only differences are queued.
#[derive(Debug, Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn switch(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // SGR reset drops the colors too, so both are resent after it.
        let reset = !prev.is_some_and(|p| p.same_attributes(&style));
        if reset {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if reset || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(true_color(style.fg)))?;
        }
        if reset || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(true_color(style.bg)))?;
        }
        Ok(())
    }

    fn release(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        self.current = None;
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn true_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
