//! Classic falling-block puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `classic_tetris::{core,engine,input,term,types}` and
//! holds the pieces only the binary needs: argument parsing and the JSONL
//! event log.

pub mod cli;
pub mod event_log;

pub use classic_tetris_core as core;
pub use classic_tetris_engine as engine;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;
