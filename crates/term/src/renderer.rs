//! Terminal presentation: turns framebuffers into escape sequences.
//!
//! Only cells that differ from the last presented frame are emitted; a size
//! change or [`TerminalRenderer::invalidate`] clears and repaints everything.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Owns the output stream and the last frame it showed.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
    raw: bool,
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            scratch: Vec::with_capacity(16 * 1024),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.raw = true;
        self.shown = None;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::DisableLineWrap)?
            .queue(cursor::Hide)?;
        self.flush_scratch()
    }

    /// Undo [`enter`](Self::enter). Does nothing when not entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        self.scratch.clear();
        self.scratch
            .queue(SetAttribute(Attribute::Reset))?
            .queue(cursor::Show)?
            .queue(terminal::EnableLineWrap)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_scratch()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }

    /// Forget the shown frame so the next present repaints from scratch.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb` and return the number of bytes written.
    ///
    /// Afterwards `fb` holds the previously shown frame, so callers can render
    /// into it again without reallocating.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.scratch.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.scratch)?;
        self.flush_scratch()?;

        let old = self
            .shown
            .replace(std::mem::replace(fb, FrameBuffer::new(0, 0)));
        if let Some(old) = old {
            *fb = old;
        }
        Ok(self.scratch.len())
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.out
            .write_all(&self.scratch)
            .and_then(|_| self.out.flush())
            .context("failed to write to terminal")
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Style currently active on the terminal, so unchanged parts are skipped.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, want: CellStyle) -> io::Result<()> {
        let attrs_changed = self.style.map_or(true, |cur| cur.bold != want.bold);
        if attrs_changed {
            // Reset also drops colours, so they are re-sent below.
            out.queue(SetAttribute(Attribute::Reset))?;
            if want.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
        }
        let cur = if attrs_changed { None } else { self.style };
        if cur.map(|c| c.fg) != Some(want.fg) {
            out.queue(SetForegroundColor(color(want.fg)))?;
        }
        if cur.map(|c| c.bg) != Some(want.bg) {
            out.queue(SetBackgroundColor(color(want.bg)))?;
        }
        self.style = Some(want);
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Append the escape sequences that turn `prev` into `next`.
///
/// With no usable `prev` (none, or a different size) the screen is cleared
/// and every cell is written.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    // Where the terminal cursor is after the last printed cell.
    let mut cursor_at: Option<(u16, u16)> = None;

    for y in 0..next.height() {
        for x in 0..next.width() {
            let Some(cell) = next.get(x, y) else {
                continue;
            };
            if prev.and_then(|p| p.get(x, y)) == Some(cell) {
                continue;
            }
            if cursor_at != Some((x, y)) {
                out.queue(cursor::MoveTo(x, y))?;
            }
            pen.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
            cursor_at = Some((x + 1, y));
        }
    }

    if pen.style.is_some() {
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}
