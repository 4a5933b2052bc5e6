//! Engine controller for classic falling-block play.
//!
//! [`Engine`] owns the grid, the active and next pieces and the progression,
//! and is the only thing that mutates them. Front-ends drive it with commands
//! and learn about changes by subscribing to [`EngineEvent`]s.

pub mod engine;
pub mod events;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use engine::{ActivePiece, DropOutcome, Engine};
pub use events::{EngineEvent, EventHub};
