//! Pixel canvas: rasterises a snapshot at `CELL_PX` pixels per board cell.
//!
//! Pure like `GameView`; the only I/O is [`PixelCanvas::save_png`].

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameSnapshot;
use crate::fb::Rgb;
use crate::font;
use crate::game_view::status_message;
use crate::palette::Palette;
use crate::types::{Direction, Position, CELL_PX};

/// Owned RGB raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.resize((width as usize) * (height as usize), Rgb::default());
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        for py in y..y.saturating_add(h).min(self.height) {
            for px in x..x.saturating_add(w).min(self.width) {
                self.put(px, py, color);
            }
        }
    }

    /// Composite `color` over every pixel.
    pub fn tint(&mut self, color: Rgb, alpha: u8) {
        for p in &mut self.pixels {
            *p = p.blend(color, alpha);
        }
    }

    /// Packed RGB8 bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("failed to write screenshot to {}", path.display()))
    }
}

/// Draws snapshots onto a [`PixelCanvas`].
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    cell_px: u32,
    palette: Palette,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self {
            cell_px: CELL_PX,
            palette: Palette::default(),
        }
    }
}

impl CanvasRenderer {
    pub fn new(cell_px: u32, palette: Palette) -> Self {
        Self {
            cell_px: cell_px.max(4),
            palette,
        }
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    pub fn render(&self, snap: &GameSnapshot) -> PixelCanvas {
        let mut canvas = PixelCanvas::new(0, 0);
        self.render_into(snap, &mut canvas);
        canvas
    }

    /// Draw order: checkerboard, treasure, snake (tail to head), overlay.
    pub fn render_into(&self, snap: &GameSnapshot, canvas: &mut PixelCanvas) {
        let side = snap.grid_size as u32 * self.cell_px;
        canvas.resize(side, side);

        for y in 0..snap.grid_size as i16 {
            for x in 0..snap.grid_size as i16 {
                let (px, py) = self.origin(Position::new(x, y));
                let tone = self.palette.board_tone(x, y);
                canvas.fill_rect(px, py, self.cell_px, self.cell_px, tone);
            }
        }

        if let Some(treasure) = snap.treasure {
            self.draw_treasure(canvas, snap.grid_size, treasure);
        }

        let len = snap.snake.len();
        for (i, &pos) in snap.snake.iter().enumerate().rev() {
            if !pos.in_bounds(snap.grid_size) {
                continue;
            }
            if i == 0 {
                self.draw_head(canvas, pos, snap.direction);
            } else {
                let inset = self.cell_px / 12;
                let (px, py) = self.origin(pos);
                let size = self.cell_px - 2 * inset;
                let color = self.palette.segment_color(i, len);
                canvas.fill_rect(px + inset, py + inset, size, size, color);
            }
        }

        if let Some(msg) = status_message(snap) {
            canvas.tint(self.palette.overlay, self.palette.overlay_alpha);
            self.draw_text_centered(canvas, msg);
        }
    }

    fn origin(&self, pos: Position) -> (u32, u32) {
        (pos.x as u32 * self.cell_px, pos.y as u32 * self.cell_px)
    }

    fn draw_treasure(&self, canvas: &mut PixelCanvas, grid: u8, pos: Position) {
        if !pos.in_bounds(grid) {
            return;
        }
        let (ox, oy) = self.origin(pos);
        let n = self.cell_px as i64;
        // Doubled coordinates keep the centre on a pixel boundary for even sizes.
        let radius = n * 7 / 10;
        let glint = radius / 3;
        let glint_cx = -radius / 3;
        let glint_cy = -radius / 3;

        for py in 0..n {
            for px in 0..n {
                let dx = 2 * px + 1 - n;
                let dy = 2 * py + 1 - n;
                if dx.abs() + dy.abs() > radius {
                    continue;
                }
                let in_glint = (dx - glint_cx).abs() + (dy - glint_cy).abs() <= glint;
                let color = if in_glint {
                    self.palette.treasure_highlight
                } else {
                    self.palette.treasure
                };
                canvas.put(ox + px as u32, oy + py as u32, color);
            }
        }
    }

    fn draw_head(&self, canvas: &mut PixelCanvas, pos: Position, dir: Direction) {
        let (ox, oy) = self.origin(pos);
        let n = self.cell_px;

        // Gradient from the trailing edge (head colour) to the leading edge (glow).
        for py in 0..n {
            for px in 0..n {
                let t = match dir {
                    Direction::Right => px,
                    Direction::Left => n - 1 - px,
                    Direction::Down => py,
                    Direction::Up => n - 1 - py,
                };
                let color = self.palette.head.lerp(self.palette.head_glow, t, n - 1);
                canvas.put(ox + px, oy + py, color);
            }
        }

        let eye = (n / 5).max(2);
        let pupil = (eye / 2).max(1);
        let near = n - n / 4 - eye / 2;
        let far = n / 4 - eye / 2;
        let side_a = n / 4 - eye / 2;
        let side_b = n - n / 4 - eye / 2;
        // Eye centres sit a quarter cell in from the leading edge.
        let eyes = match dir {
            Direction::Right => [(near, side_a), (near, side_b)],
            Direction::Left => [(far, side_a), (far, side_b)],
            Direction::Down => [(side_a, near), (side_b, near)],
            Direction::Up => [(side_a, far), (side_b, far)],
        };
        let (ddx, ddy) = dir.delta();
        for (ex, ey) in eyes {
            canvas.fill_rect(ox + ex, oy + ey, eye, eye, self.palette.eye);
            // Pupils look where the snake is going.
            let px = (ex + (eye - pupil) / 2) as i64 + ddx as i64 * ((eye - pupil) / 2) as i64;
            let py = (ey + (eye - pupil) / 2) as i64 + ddy as i64 * ((eye - pupil) / 2) as i64;
            canvas.fill_rect(
                ox + px as u32,
                oy + py as u32,
                pupil,
                pupil,
                self.palette.pupil,
            );
        }
    }

    fn draw_text_centered(&self, canvas: &mut PixelCanvas, text: &str) {
        let scale = (self.cell_px / 8).max(1);
        let text_w = font::text_width(text) * scale;
        let text_h = font::GLYPH_H * scale;
        let x0 = canvas.width().saturating_sub(text_w) / 2;
        let y0 = canvas.height().saturating_sub(text_h) / 2;

        for (i, ch) in text.chars().enumerate() {
            let cx = x0 + i as u32 * font::ADVANCE * scale;
            for gy in 0..font::GLYPH_H {
                for gx in 0..font::GLYPH_W {
                    if font::lit(ch, gx, gy) {
                        canvas.fill_rect(
                            cx + gx * scale,
                            y0 + gy * scale,
                            scale,
                            scale,
                            self.palette.text,
                        );
                    }
                }
            }
        }
    }
}
