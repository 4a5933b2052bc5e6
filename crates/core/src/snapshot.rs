use serde::{Deserialize, Serialize};

use crate::pieces::PieceCells;
use crate::types::{EngineState, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub pivot: (i8, i8),
    pub cells: PieceCells,
}

/// Read-only picture of the engine for renderers and loggers.
///
/// `cells` holds one identity byte per grid cell in row-major order, 0 for empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub shadow: Option<PieceCells>,
    pub next: PieceKind,
    pub state: EngineState,
    pub score: u32,
    pub level: u32,
    pub rows_cleared: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    /// Locked kind at (x, y), None for empty or out of range
    pub fn cell(&self, x: u8, y: u8) -> Option<PieceKind> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells
            .get(idx)
            .copied()
            .and_then(PieceKind::from_identity)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![0; (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize)],
            active: None,
            shadow: None,
            next: PieceKind::O,
            state: EngineState::Idle,
            score: 0,
            level: 0,
            rows_cleared: 0,
            fall_interval_ms: crate::types::BASE_FALL_MS,
        }
    }
}
