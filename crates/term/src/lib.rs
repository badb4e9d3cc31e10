//! Terminal front end for the packed playfield engine.
//!
//! The engine only knows "draw this cell"; this crate turns those calls into
//! a framebuffer of monochrome character cells and flushes it to a real
//! terminal with diff-based redraws.
//!
//! - [`fb`]: framebuffer and per-cell attributes
//! - [`game_view`]: engine grid to framebuffer (pure, testable)
//! - [`renderer`]: framebuffer to terminal via crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use packtris_core as core;
pub use packtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
