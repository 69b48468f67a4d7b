//! Colours, cell styles and the character framebuffer the views draw into.

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear mix: `num/den` of the way from `self` to `other`.
    pub fn lerp(self, other: Rgb, num: u32, den: u32) -> Rgb {
        if den == 0 {
            return self;
        }
        let t = num.min(den);
        let mix = |from: u8, to: u8| ((from as u32 * (den - t) + to as u32 * t) / den) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// `over` composited on top of `self` at opacity `alpha` (0-255).
    pub fn blend(self, over: Rgb, alpha: u8) -> Rgb {
        self.lerp(over, alpha as u32, 255)
    }
}

/// Foreground/background pair plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
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
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', CellStyle::default())
    }
}

/// Row-major grid of styled characters. Writes outside the grid are dropped.
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

    /// Change dimensions, keeping the allocation when it is big enough.
    /// Contents are unspecified afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.cells.resize(width as usize * height as usize, Cell::default());
        }
    }

    #[inline(always)]
    fn slot(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.slot(x, y) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell::new(ch, style));
    }

    /// Write `s` left to right from `(x, y)`, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.put_char(cx, y, ch, style);
        }
    }

    /// Decimal rendering of `v` without going through a `String`.
    pub fn put_u32(&mut self, x: u16, y: u16, v: u32, style: CellStyle) {
        let digits = if v == 0 { 1 } else { v.ilog10() + 1 };
        let mut rest = v;
        for i in (0..digits as u16).rev() {
            let ch = char::from(b'0' + (rest % 10) as u8);
            self.put_char(x.saturating_add(i), y, ch, style);
            rest /= 10;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        self.for_rect(x, y, w, h, |cell| *cell = Cell::new(ch, style));
    }

    /// Pull both colours of every cell in the rectangle towards `tint`.
    pub fn tint_rect(&mut self, x: u16, y: u16, w: u16, h: u16, tint: Rgb, alpha: u8) {
        self.for_rect(x, y, w, h, |cell| {
            cell.style.fg = cell.style.fg.blend(tint, alpha);
            cell.style.bg = cell.style.bg.blend(tint, alpha);
        });
    }

    fn for_rect(&mut self, x: u16, y: u16, w: u16, h: u16, mut f: impl FnMut(&mut Cell)) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                if let Some(cell) = self.slot(cx, cy) {
                    f(cell);
                }
            }
        }
    }

    /// Characters of row `y`, styles dropped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.lerp(b, 0, 4), a);
        assert_eq!(a.lerp(b, 4, 4), b);
        assert_eq!(a.lerp(b, 2, 4), Rgb::new(100, 100, 100));
        assert_eq!(a.lerp(b, 1, 0), a);
    }

    #[test]
    fn test_blend_opacity() {
        let base = Rgb::new(200, 200, 200);
        assert_eq!(base.blend(Rgb::new(0, 0, 0), 0), base);
        assert_eq!(base.blend(Rgb::new(0, 0, 0), 255), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_put_u32_and_row_text() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_u32(1, 0, 1230, CellStyle::default());
        assert_eq!(fb.row_text(0), " 1230   ");
        fb.put_u32(6, 0, 0, CellStyle::default());
        assert_eq!(fb.row_text(0), " 1230 0 ");
    }

    #[test]
    fn test_put_u32_max() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.put_u32(0, 0, u32::MAX, CellStyle::default());
        assert_eq!(fb.row_text(0), "4294967295");
    }

    #[test]
    fn test_tint_rect_darkens_colors() {
        let mut fb = FrameBuffer::new(2, 1);
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(100, 100, 100));
        fb.fill_rect(0, 0, 2, 1, 'x', style);
        fb.tint_rect(0, 0, 1, 1, Rgb::new(0, 0, 0), 128);

        let dimmed = fb.get(0, 0).unwrap().style;
        assert!(dimmed.bg.r < 100);
        assert!(dimmed.fg.r < 200);
        assert_eq!(fb.get(1, 0).unwrap().style, style);
    }

    #[test]
    fn test_writes_outside_are_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(5, 5, 'x', CellStyle::default());
        fb.put_str(1, 0, "abc", CellStyle::default());
        fb.fill_rect(1, 1, 9, 9, '#', CellStyle::default());
        assert_eq!(fb.row_text(0), " a");
        assert_eq!(fb.row_text(1), " #");
    }
}
