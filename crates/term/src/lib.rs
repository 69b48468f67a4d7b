//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! Everything except [`renderer`] and [`PixelCanvas::save_png`] is pure:
//! a [`core::GameSnapshot`] plus a [`Palette`] in, a frame out.
//!
//! - [`GameView`]: snapshot to terminal framebuffer (2 columns per cell)
//! - [`CanvasRenderer`]: snapshot to RGB pixels at `CELL_PX` per cell
//! - [`TerminalRenderer`]: diffs and flushes framebuffers to stdout

pub mod canvas;
pub mod fb;
pub mod font;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use canvas::{CanvasRenderer, PixelCanvas};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{status_message, GameView, Viewport};
pub use palette::Palette;
pub use renderer::{encode_frame, TerminalRenderer};
