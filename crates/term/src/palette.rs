//! Colour theme shared by the terminal view and the pixel canvas.

use crate::fb::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Area outside the board.
    pub backdrop: Rgb,
    pub border: Rgb,
    /// Checkerboard tones.
    pub board_light: Rgb,
    pub board_dark: Rgb,
    pub treasure: Rgb,
    /// Accent on the treasure's upper-left facet.
    pub treasure_highlight: Rgb,
    /// Head colour; the body fades from `body_front` to `body_tail`.
    pub head: Rgb,
    /// Lighter edge of the head gradient.
    pub head_glow: Rgb,
    pub body_front: Rgb,
    pub body_tail: Rgb,
    pub eye: Rgb,
    pub pupil: Rgb,
    /// Game-over dimming colour and its opacity.
    pub overlay: Rgb,
    pub overlay_alpha: u8,
    pub text: Rgb,
    pub label: Rgb,
    pub muted: Rgb,
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            backdrop: Rgb::new(0, 0, 0),
            border: Rgb::new(200, 200, 200),
            board_light: Rgb::new(38, 42, 54),
            board_dark: Rgb::new(30, 33, 43),
            treasure: Rgb::new(240, 190, 60),
            treasure_highlight: Rgb::new(255, 245, 200),
            head: Rgb::new(60, 200, 120),
            head_glow: Rgb::new(150, 240, 180),
            body_front: Rgb::new(50, 170, 100),
            body_tail: Rgb::new(25, 90, 60),
            eye: Rgb::new(245, 245, 245),
            pupil: Rgb::new(20, 20, 20),
            overlay: Rgb::new(0, 0, 0),
            overlay_alpha: 150,
            text: Rgb::new(255, 255, 255),
            label: Rgb::new(220, 220, 220),
            muted: Rgb::new(130, 130, 140),
        }
    }

    pub const fn light() -> Self {
        Self {
            backdrop: Rgb::new(250, 250, 245),
            border: Rgb::new(60, 60, 60),
            board_light: Rgb::new(236, 240, 226),
            board_dark: Rgb::new(222, 228, 210),
            treasure: Rgb::new(210, 90, 40),
            treasure_highlight: Rgb::new(255, 220, 190),
            head: Rgb::new(40, 120, 200),
            head_glow: Rgb::new(120, 180, 240),
            body_front: Rgb::new(50, 110, 180),
            body_tail: Rgb::new(140, 170, 210),
            eye: Rgb::new(255, 255, 255),
            pupil: Rgb::new(10, 10, 30),
            overlay: Rgb::new(255, 255, 255),
            overlay_alpha: 140,
            text: Rgb::new(20, 20, 20),
            label: Rgb::new(40, 40, 40),
            muted: Rgb::new(120, 120, 120),
        }
    }

    /// Checkerboard tone for the cell at `(x, y)`.
    pub fn board_tone(&self, x: i16, y: i16) -> Rgb {
        if (x + y).rem_euclid(2) == 0 {
            self.board_light
        } else {
            self.board_dark
        }
    }

    /// Body colour for segment `index` (0 = head) of a snake of `len`.
    pub fn segment_color(&self, index: usize, len: usize) -> Rgb {
        if index == 0 {
            return self.head;
        }
        let span = len.saturating_sub(2).max(1) as u32;
        self.body_front.lerp(self.body_tail, (index - 1) as u32, span)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
