//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine, the terminal view,
//! and any external driver that wants to name pieces or commands.
//!
//! # Grid Dimensions
//!
//! Classic playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), 30 rows in the tall variant
//! - **Spawn pivot**: column `width / 2`, row 1
//!
//! # Fall Interval
//!
//! The engine computes the gravity interval, an external timer enforces it:
//!
//! ```text
//! interval_ms = max(FALL_FLOOR_MS, BASE_FALL_MS - (BASE_FALL_MS / 20) * level)
//! ```
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 500ms |
//! | 1 | 475ms |
//! | 4 | 400ms |
//! | 10 | 250ms |
//! | 18+ | 50ms (floor) |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let square = PieceKind::from_identity(1).unwrap();
//! assert_eq!(square, PieceKind::O);
//! assert_eq!(PieceKind::from_str("z"), Some(PieceKind::Z));
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Grid height in cells (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Grid height of the tall variant (30 rows)
pub const TALL_BOARD_HEIGHT: u8 = 30;

/// Largest accepted grid width or height.
pub const MAX_BOARD_DIMENSION: u8 = 64;

/// Row of the spawn pivot (one below the topmost row)
pub const SPAWN_ROW: i8 = 1;

/// Fall interval at level 0 (500ms per row)
pub const BASE_FALL_MS: u32 = 500;

/// Fastest fall interval the engine will ever report (50ms)
pub const FALL_FLOOR_MS: u32 = 50;

/// Each level shortens the interval by `base / FALL_STEP_DIVISOR`
pub const FALL_STEP_DIVISOR: u32 = 20;

/// Points multiplier in `rows² · (level + 1) · multiplier`
pub const LINE_SCORE_MULTIPLIER: u32 = 10;

/// Rows that must be cleared per level
pub const ROWS_PER_LEVEL: u32 = 10;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `percent / 100`, like a "darker" shade for outlines.
    pub fn scaled(self, percent: u8) -> Self {
        let f = |c: u8| ((c as u16 * percent as u16) / 100) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

/// The seven piece kinds
///
/// The declaration order is the display identity order: O=1, I=2, T=3, L=4,
/// J=5, S=6, Z=7. Locked grid cells remember the identity so they can be
/// recolored later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    O,
    I,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in identity order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Display identity in `1..=7`.
    pub fn identity(self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I => 2,
            PieceKind::T => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::identity`]. `0` and anything above 7 map to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_identity(2), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_identity(0), None);
    /// assert_eq!(PieceKind::from_identity(8), None);
    /// ```
    pub fn from_identity(identity: u8) -> Option<Self> {
        match identity {
            1..=7 => Some(Self::ALL[(identity - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Display color (neon palette).
    pub fn color(self) -> Rgb {
        match self {
            PieceKind::O => Rgb::new(255, 255, 51),
            PieceKind::I => Rgb::new(51, 255, 255),
            PieceKind::T => Rgb::new(255, 51, 255),
            PieceKind::L => Rgb::new(255, 153, 51),
            PieceKind::J => Rgb::new(51, 102, 255),
            PieceKind::S => Rgb::new(102, 255, 51),
            PieceKind::Z => Rgb::new(255, 51, 51),
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Lifecycle state of the engine
///
/// `Idle → Running → (Paused ⇄ Running) → GameOver`, and back to `Idle` on
/// reset from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
            EngineState::GameOver => "game_over",
        }
    }
}

/// Commands an external driver can issue to the engine
///
/// Input dispatchers translate key presses into these; the periodic timer
/// issues [`GameCommand::Tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Leave `Idle` (or restart after `GameOver`) and spawn the first piece
    Start,
    Pause,
    Resume,
    /// Pause while running, resume while paused
    TogglePause,
    /// Back to an empty `Idle` engine
    Reset,
    /// One gravity step
    Tick,
    MoveLeft,
    MoveRight,
    /// Rotate 90° clockwise about the pivot
    Rotate,
    /// One row down, locking if blocked
    SoftDrop,
    /// Fall to the landing position and lock immediately
    HardDrop,
}

impl GameCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("TOGGLEPAUSE"), Some(GameCommand::TogglePause));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "togglepause" => Some(GameCommand::TogglePause),
            "reset" => Some(GameCommand::Reset),
            "tick" => Some(GameCommand::Tick),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotate" => Some(GameCommand::Rotate),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Reset => "reset",
            GameCommand::Tick => "tick",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Rotate => "rotate",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
        }
    }

    /// Commands that move or drop the active piece. These are ignored unless
    /// the engine is running.
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            GameCommand::Tick
                | GameCommand::MoveLeft
                | GameCommand::MoveRight
                | GameCommand::Rotate
                | GameCommand::SoftDrop
                | GameCommand::HardDrop
        )
    }
}
