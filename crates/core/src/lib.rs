//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the data structures and rules the engine controller is
//! built from. It has **zero dependencies** on UI, timers, or I/O:
//!
//! - **Deterministic**: a seed (or a scripted source) fixes the piece sequence
//! - **Testable**: every rule is a plain function or a small value type
//! - **Portable**: runs the same in a terminal, a GUI, or a headless test
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size locked-block matrix, collision queries, row compaction
//! - [`pieces`]: the seven pivot-relative shapes and quarter-turn rotation
//! - [`rng`]: the pluggable next-piece source
//! - [`scoring`]: score, rows, level and fall interval
//! - [`config`]: construction-time parameters and their validation
//! - [`snapshot`]: immutable render/log view of an engine
//!
//! # Game Rules
//!
//! Classic rule set, deliberately without modern extras:
//!
//! - **Uniform randomizer**: every draw is independent over the 7 kinds
//! - **Pivot rotation**: 90° clockwise about the pivot, no wall kicks
//! - **Immediate lock**: a piece locks the moment it cannot fall
//! - **Quadratic scoring**: `n² · (level + 1) · 10` for `n` rows at once
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{Grid, pieces};
//! use classic_tetris_core::types::PieceKind;
//!
//! let grid = Grid::new(10, 22);
//! let cells = pieces::place(&pieces::get_shape(PieceKind::T), pieces::spawn_pivot(10));
//! assert!(grid.fits(&cells));
//! ```

pub mod config;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use grid::Grid;
pub use pieces::{get_shape, rotate_cw, PieceCells, PieceShape};
pub use rng::{NextPieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::{calculate_level, calculate_line_score, fall_interval_ms, ClearResult, Progression};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
