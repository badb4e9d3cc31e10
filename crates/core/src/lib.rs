//! Core engine - packed playfield, pieces, rotation, line clears
//!
//! This crate is the whole game: everything that decides where blocks are.
//! It is `no_std`, never allocates, and has **no I/O**; the host supplies
//! input, pacing, pixels and a random seed through the traits in [`io`].
//!
//! # Module Structure
//!
//! - [`grid`]: 12x21 playfield at 2 bits per cell (63 bytes)
//! - [`pieces`]: shape catalog and spawn offsets
//! - [`rotation`]: per-shape delta tables and the reject-on-overlap rotate
//! - [`movement`]: shift, fall, and landing with fused lock
//! - [`line_clear`]: full-row detection and per-column compaction
//! - [`rng`]: uniform shape picker
//! - [`engine`]: the [`GameEngine`] aggregate and its round controller
//! - [`config`]: fall rate, rotation cooldown and tick pacing
//! - [`io`]: input, render and entropy capabilities
//!
//! # Rules
//!
//! - **Five shapes**: Square, Bar, T, L, Z, drawn uniformly, no preview
//! - **No kicks**: a rotation that overlaps anything is simply refused
//! - **No lock delay**: a piece locks on the tick it is found resting
//! - **Column compaction**: after a row clears, locked cells above it fall
//!   straight down as far as their column allows
//! - **Game over**: a piece locks with a square in row 1
//!
//! # Example
//!
//! ```
//! use packtris_core::GameEngine;
//! use packtris_types::{InputState, RoundPhase};
//!
//! let mut engine = GameEngine::new(12345);
//!
//! // First tick spawns a piece
//! assert_eq!(engine.tick(InputState::IDLE), RoundPhase::Falling);
//!
//! // Hold fast-drop and shift left for a while
//! let input = InputState {
//!     shift_left: true,
//!     fast_drop: true,
//!     ..InputState::IDLE
//! };
//! for _ in 0..30 {
//!     engine.tick(input);
//! }
//! assert!(engine.pieces_locked() >= 1);
//! ```
//!
//! # Logging
//!
//! Enable the `defmt` feature to route spawn, lock, clear and game-over
//! events through `defmt`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod grid;
pub mod io;
pub mod line_clear;
pub mod movement;
pub mod pieces;
pub mod rng;
pub mod rotation;

pub use packtris_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::GameEngine;
pub use grid::{CellPos, PackedGrid};
pub use io::{CellRenderer, ConstInput, EntropySource, FixedSeed, InputSource};
pub use line_clear::{clear_lines, ClearedRows};
pub use pieces::{spawn_offsets, Piece, PieceCells};
pub use rng::{ShapePicker, SimpleRng};
pub use rotation::RotationStep;
