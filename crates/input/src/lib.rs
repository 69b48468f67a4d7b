//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond
//! `crossterm`'s key events. It maps them into [`crate::types::GameAction`]s
//! and recognises the quit chord. Unrecognised keys map to nothing.

pub mod map;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
