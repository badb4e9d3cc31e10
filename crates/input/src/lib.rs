//! Terminal input module (engine-facing).
//!
//! The engine polls four signals once per tick. Terminals deliver discrete
//! key events instead, so this crate maps `crossterm` keys onto those
//! signals and latches them between ticks. Fast-drop is a held modifier;
//! terminals without key-release events keep it alive with a timeout.

pub mod latch;
pub mod map;

pub use packtris_types as types;

pub use latch::KeyLatch;
pub use map::{is_restart, map_key, should_quit, Signal};
