//! Terminal front-end rendering.
//!
//! A small, game-oriented layer: [`GameView`] paints an engine snapshot into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes only what changed since
//! the previous frame. Board cells are two columns wide to make them roughly
//! square on common terminal fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
