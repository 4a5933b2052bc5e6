//! Engine notifications and their fan-out.
//!
//! The controller publishes every state change on one [`EventHub`]. Any number
//! of listeners (renderer, score display, next-piece preview, event log, the
//! fall timer) hold their own `Receiver` and drain it at their own pace.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::types::{EngineState, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    StateChanged { state: EngineState },
    ScoreChanged { score: u32 },
    /// Carries the new fall interval so a timer driver can reschedule without
    /// querying back.
    LevelChanged { level: u32, fall_interval_ms: u32 },
    RowsClearedChanged { rows_cleared_total: u32 },
    NextPieceChanged { next: PieceKind },
    PieceLocked { kind: PieceKind, rows_cleared: u32 },
    GameOver {
        score: u32,
        level: u32,
        rows_cleared_total: u32,
    },
}

impl EngineEvent {
    /// Events after which an external timer should requery the fall interval
    pub fn affects_timing(&self) -> bool {
        matches!(
            self,
            EngineEvent::LevelChanged { .. } | EngineEvent::StateChanged { .. }
        )
    }
}

/// Broadcasts events to every live subscriber
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<Sender<EngineEvent>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every subscriber, dropping the ones whose receiver is gone
    pub fn emit(&mut self, event: EngineEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
