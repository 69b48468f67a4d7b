//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Outcome, Phase};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::palette::Palette;
use crate::types::{Direction, Position};

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

/// Message shown over the board once a game has ended.
pub fn status_message(snap: &GameSnapshot) -> Option<&'static str> {
    if snap.phase != Phase::GameOver {
        return None;
    }
    match snap.outcome {
        Some(Outcome::BoardFilled) => Some("YOU WIN"),
        _ => Some("GAME OVER"),
    }
}

/// A lightweight terminal renderer for the snake board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            palette: Palette::default(),
        }
    }
}

/// Board placement inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        let backdrop = CellStyle::new(self.palette.label, self.palette.backdrop);
        fb.clear(Cell {
            ch: ' ',
            style: backdrop,
        });

        let grid = snap.grid_size as u16;
        let frame_w = grid * self.cell_w + 2;
        let frame_h = grid * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame);
        self.draw_checkerboard(fb, frame, snap.grid_size);
        if let Some(treasure) = snap.treasure {
            self.draw_treasure(fb, frame, treasure);
        }
        self.draw_snake(fb, frame, snap);
        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(msg) = status_message(snap) {
            fb.tint_rect(
                frame.x + 1,
                frame.y + 1,
                frame.w - 2,
                frame.h - 2,
                self.palette.overlay,
                self.palette.overlay_alpha,
            );
            self.draw_overlay_text(fb, frame, 0, msg);
            self.draw_overlay_text(fb, frame, 1, "R TO RESTART");
        } else if snap.phase == Phase::Paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
        } else if snap.phase == Phase::Idle {
            self.draw_overlay_text(fb, frame, 0, "PRESS SPACE");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let style = CellStyle::new(self.palette.border, self.palette.backdrop);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(f.x + f.w - 1, f.y, '┐', style);
        fb.put_char(f.x, f.y + f.h - 1, '└', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '┘', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '─', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '─', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '│', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '│', style);
        }
    }

    fn draw_checkerboard(&self, fb: &mut FrameBuffer, f: Frame, grid: u8) {
        for y in 0..grid as i16 {
            for x in 0..grid as i16 {
                let tone = self.palette.board_tone(x, y);
                let style = CellStyle::new(tone, tone);
                self.fill_cell(fb, f, Position::new(x, y), ' ', style);
            }
        }
    }

    fn draw_treasure(&self, fb: &mut FrameBuffer, f: Frame, pos: Position) {
        let bg = self.palette.board_tone(pos.x, pos.y);
        let Some((px, py)) = self.cell_origin(f, pos) else {
            return;
        };
        // Highlight facet on the left column, body on the rest.
        let accent = CellStyle::new(self.palette.treasure_highlight, bg).bold();
        let body = CellStyle::new(self.palette.treasure, bg).bold();
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let style = if dx == 0 && self.cell_w > 1 { accent } else { body };
                fb.put_char(px + dx, py + dy, '◆', style);
            }
        }
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        let len = snap.snake.len();
        // Tail first so the head wins if anything ever overlaps.
        for (i, &pos) in snap.snake.iter().enumerate().rev() {
            if i == 0 {
                self.draw_head(fb, f, pos, snap.direction);
            } else {
                let color = self.palette.segment_color(i, len);
                self.fill_cell(fb, f, pos, ' ', CellStyle::new(color, color));
            }
        }
    }

    fn draw_head(&self, fb: &mut FrameBuffer, f: Frame, pos: Position, dir: Direction) {
        let Some((px, py)) = self.cell_origin(f, pos) else {
            return;
        };
        let head = self.palette.head;
        let glow = self.palette.head_glow;
        let last_col = self.cell_w - 1;
        let last_row = self.cell_h - 1;

        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                // The leading edge is lighter; eyes sit on it.
                let leading = match dir {
                    Direction::Right => dx == last_col,
                    Direction::Left => dx == 0,
                    Direction::Up => dy == 0,
                    Direction::Down => dy == last_row,
                };
                let bg = if leading { glow } else { head };
                let ch = if !leading {
                    ' '
                } else {
                    match dir {
                        Direction::Left | Direction::Right => ':',
                        Direction::Up => '˙',
                        Direction::Down => '.',
                    }
                };
                let style = CellStyle::new(self.palette.pupil, bg).bold();
                fb.put_char(px + dx, py + dy, ch, style);
            }
        }
    }

    /// Top-left terminal cell of a board cell, `None` when off the board.
    fn cell_origin(&self, f: Frame, pos: Position) -> Option<(u16, u16)> {
        let grid = (f.w - 2) / self.cell_w;
        if pos.x < 0 || pos.y < 0 || pos.x as u16 >= grid || pos.y as u16 >= grid {
            return None;
        }
        Some((
            f.x + 1 + pos.x as u16 * self.cell_w,
            f.y + 1 + pos.y as u16 * self.cell_h,
        ))
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, pos: Position, ch: char, style: CellStyle) {
        if let Some((px, py)) = self.cell_origin(f, pos) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        f: Frame,
    ) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(self.palette.label, self.palette.backdrop).bold();
        let value = CellStyle::new(self.palette.label, self.palette.backdrop);
        let muted = CellStyle::new(self.palette.muted, self.palette.backdrop);

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LENGTH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.snake.len() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        let state = match snap.phase {
            Phase::Idle => "READY",
            Phase::Running => "PLAYING",
            Phase::Paused => "PAUSED",
            Phase::GameOver => "OVER",
        };
        fb.put_str(panel_x, y, state, value);
        y = y.saturating_add(2);

        for line in ["MOVE  ←↑↓→ WASD", "PAUSE SPACE P", "NEW   R ENTER", "QUIT  Q ESC"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, muted);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, line: u16, text: &str) {
        let mid_y = f.y.saturating_add(f.h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(self.palette.text, self.palette.overlay).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
