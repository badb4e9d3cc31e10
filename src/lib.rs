//! Packtris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can write `packtris::core::GameEngine`.

pub use packtris_core as core;
pub use packtris_input as input;
pub use packtris_term as term;
pub use packtris_types as types;
