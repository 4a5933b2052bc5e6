//! The engine controller: lifecycle, piece movement and the lock cycle.
//!
//! All mutation happens through the command methods on [`Engine`]. Each command
//! runs to completion before the next one is accepted, and the events it
//! produced are published only once it has finished, so subscribers never see
//! a half-applied command.

use std::sync::mpsc::Receiver;

use arrayvec::ArrayVec;

use crate::core::pieces::{self, PieceCells, PieceShape};
use crate::core::{
    fall_interval_ms, ActiveSnapshot, ConfigError, EngineConfig, GameSnapshot, Grid,
    NextPieceSource, Progression, UniformSource,
};
use crate::events::{EngineEvent, EventHub};
use crate::types::{EngineState, GameCommand, PieceKind};

/// Upper bound of events a single command can produce before a flush.
const EVENT_BATCH: usize = 16;

/// The falling piece: a kind, a pivot and its current rotated offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub pivot: (i8, i8),
    pub shape: PieceShape,
}

impl ActivePiece {
    /// A fresh piece in spawn orientation at the spawn pivot for `width`
    pub fn spawn(kind: PieceKind, width: u8) -> Self {
        Self {
            kind,
            pivot: pieces::spawn_pivot(width),
            shape: pieces::get_shape(kind),
        }
    }

    pub fn cells(&self) -> PieceCells {
        pieces::place(&self.shape, self.pivot)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            pivot: (self.pivot.0 + dx, self.pivot.1 + dy),
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: pieces::rotate_for(self.kind, &self.shape),
            ..*self
        }
    }

    pub fn fits(&self, grid: &Grid) -> bool {
        grid.fits(&self.cells())
    }
}

/// Result of a tick, soft drop or hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Not running, or nothing to drop
    Ignored,
    /// The piece moved one row down
    Moved,
    /// The piece locked and the next one spawned
    Locked { rows_cleared: u32 },
    /// The piece locked and the next one could not spawn
    ToppedOut { rows_cleared: u32 },
}

impl DropOutcome {
    pub fn locked(&self) -> bool {
        matches!(
            self,
            DropOutcome::Locked { .. } | DropOutcome::ToppedOut { .. }
        )
    }

    pub fn rows_cleared(&self) -> u32 {
        match *self {
            DropOutcome::Locked { rows_cleared } | DropOutcome::ToppedOut { rows_cleared } => {
                rows_cleared
            }
            _ => 0,
        }
    }
}

/// Single source of truth for one game.
///
/// Generic over where new pieces come from; the default draws uniformly from a
/// seeded generator.
#[derive(Debug)]
pub struct Engine<S = UniformSource> {
    config: EngineConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    next: PieceKind,
    progression: Progression,
    state: EngineState,
    source: S,
    hub: EventHub,
    pending: ArrayVec<EngineEvent, EVENT_BATCH>,
}

impl Engine<UniformSource> {
    /// Classic configuration with a seeded uniform source
    pub fn with_seed(seed: u32) -> Self {
        let config = EngineConfig::default();
        Self::build(
            config,
            UniformSource::new(seed),
            Grid::new(config.width, config.height),
        )
    }
}

impl<S: NextPieceSource> Engine<S> {
    pub fn new(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config,
            source,
            Grid::new(config.width, config.height),
        ))
    }

    /// Start from a pre-filled grid, e.g. a test fixture or a puzzle.
    ///
    /// The grid is kept as-is until the first reset.
    pub fn from_grid(config: EngineConfig, source: S, grid: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(ConfigError::GridMismatch {
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self::build(config, source, grid))
    }

    fn build(config: EngineConfig, mut source: S, grid: Grid) -> Self {
        let next = source.next_piece();
        Self {
            config,
            grid,
            active: None,
            next,
            progression: Progression::new(),
            state: EngineState::Idle,
            source,
            hub: EventHub::new(),
            pending: ArrayVec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Back to an empty `Idle` engine with a freshly drawn next piece.
    ///
    /// Legal from every state. Always announces state, score, level, rows and
    /// the next piece so listeners can resynchronize.
    pub fn reset(&mut self) {
        self.reset_quiet();
        self.flush_events();
    }

    fn reset_quiet(&mut self) {
        self.grid.clear();
        self.active = None;
        self.progression.reset();
        self.next = self.source.next_piece();
        self.state = EngineState::Idle;

        self.push(EngineEvent::StateChanged {
            state: EngineState::Idle,
        });
        self.push(EngineEvent::ScoreChanged { score: 0 });
        self.push(EngineEvent::LevelChanged {
            level: 0,
            fall_interval_ms: self.fall_interval_ms(),
        });
        self.push(EngineEvent::RowsClearedChanged {
            rows_cleared_total: 0,
        });
        self.push(EngineEvent::NextPieceChanged { next: self.next });
    }

    /// Begin play and spawn the first piece.
    ///
    /// From `GameOver` the engine resets first. Ignored while running or paused.
    pub fn start(&mut self) -> bool {
        match self.state {
            EngineState::Idle => {}
            EngineState::GameOver => self.reset_quiet(),
            EngineState::Running | EngineState::Paused => return false,
        }

        self.state = EngineState::Running;
        self.push(EngineEvent::StateChanged {
            state: EngineState::Running,
        });
        self.spawn_next();
        self.flush_events();
        true
    }

    pub fn pause(&mut self) -> bool {
        self.transition(EngineState::Running, EngineState::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(EngineState::Paused, EngineState::Running)
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            EngineState::Running => self.pause(),
            EngineState::Paused => self.resume(),
            _ => false,
        }
    }

    fn transition(&mut self, from: EngineState, to: EngineState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        self.push(EngineEvent::StateChanged { state: to });
        self.flush_events();
        true
    }

    // ---------------------------------------------------------------------
    // Movement
    // ---------------------------------------------------------------------

    /// Translate the active piece if the target is collision-free.
    ///
    /// Leaves everything untouched and returns false otherwise, or when the
    /// engine is not running.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let moved = piece.shifted(dx, dy);
        if !moved.fits(&self.grid) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Quarter turn clockwise about the pivot. No kicks: a blocked rotation is
    /// refused. The square accepts the command without changing.
    pub fn rotate(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        if !pieces::rotates(piece.kind) {
            return true;
        }
        let turned = piece.rotated();
        if !turned.fits(&self.grid) {
            return false;
        }
        self.active = Some(turned);
        true
    }

    /// One gravity step from the timer
    pub fn tick(&mut self) -> DropOutcome {
        self.step_down()
    }

    /// One row down on request; same rules as a tick
    pub fn soft_drop(&mut self) -> DropOutcome {
        self.step_down()
    }

    /// Fall to the landing position and lock immediately
    pub fn hard_drop(&mut self) -> DropOutcome {
        if self.state != EngineState::Running {
            return DropOutcome::Ignored;
        }
        let Some(landed) = self.landing_piece() else {
            return DropOutcome::Ignored;
        };
        self.active = Some(landed);
        let outcome = self.lock_and_respawn();
        self.flush_events();
        outcome
    }

    fn step_down(&mut self) -> DropOutcome {
        if self.state != EngineState::Running || self.active.is_none() {
            return DropOutcome::Ignored;
        }
        if self.try_move(0, 1) {
            return DropOutcome::Moved;
        }
        let outcome = self.lock_and_respawn();
        self.flush_events();
        outcome
    }

    /// Dispatch a command; true when it changed anything
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Start => self.start(),
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Reset => {
                self.reset();
                true
            }
            GameCommand::Tick => self.tick() != DropOutcome::Ignored,
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::SoftDrop => self.soft_drop() != DropOutcome::Ignored,
            GameCommand::HardDrop => self.hard_drop() != DropOutcome::Ignored,
        }
    }

    // ---------------------------------------------------------------------
    // Lock cycle
    // ---------------------------------------------------------------------

    /// Lock the active piece, clear rows, score them, then spawn the next piece
    fn lock_and_respawn(&mut self) -> DropOutcome {
        let Some(piece) = self.active.take() else {
            return DropOutcome::Ignored;
        };

        for (x, y) in piece.cells() {
            self.grid.lock_cell(x, y, piece.kind);
        }

        let rows = self.grid.clear_full_rows() as u32;
        let result = self.progression.apply_clear(
            rows,
            self.config.score_multiplier,
            self.config.rows_per_level,
        );

        self.push(EngineEvent::PieceLocked {
            kind: piece.kind,
            rows_cleared: rows,
        });
        if rows > 0 {
            self.push(EngineEvent::ScoreChanged {
                score: self.progression.score(),
            });
            if result.level_changed {
                self.push(EngineEvent::LevelChanged {
                    level: self.progression.level(),
                    fall_interval_ms: self.fall_interval_ms(),
                });
            }
            self.push(EngineEvent::RowsClearedChanged {
                rows_cleared_total: self.progression.rows_cleared_total(),
            });
        }

        if self.spawn_next() {
            DropOutcome::Locked { rows_cleared: rows }
        } else {
            DropOutcome::ToppedOut { rows_cleared: rows }
        }
    }

    /// Promote the queued piece, draw a new one, and place the promoted piece
    /// at the spawn pivot. A blocked spawn ends the game with the grid as-is.
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.source.next_piece();
        self.push(EngineEvent::NextPieceChanged { next: self.next });

        let piece = ActivePiece::spawn(kind, self.config.width);
        if piece.fits(&self.grid) {
            self.active = Some(piece);
            return true;
        }

        self.active = None;
        self.state = EngineState::GameOver;
        self.push(EngineEvent::StateChanged {
            state: EngineState::GameOver,
        });
        self.push(EngineEvent::GameOver {
            score: self.progression.score(),
            level: self.progression.level(),
            rows_cleared_total: self.progression.rows_cleared_total(),
        });
        false
    }

    fn push(&mut self, event: EngineEvent) {
        if let Err(full) = self.pending.try_push(event) {
            self.flush_events();
            self.pending.push(full.element());
        }
    }

    fn flush_events(&mut self) {
        for event in self.pending.drain(..) {
            self.hub.emit(event);
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Where the active piece would come to rest if dropped now
    fn landing_piece(&self) -> Option<ActivePiece> {
        let mut piece = self.active?;
        loop {
            let below = piece.shifted(0, 1);
            if !below.fits(&self.grid) {
                return Some(piece);
            }
            piece = below;
        }
    }

    /// Landing cells of the active piece, without changing anything
    pub fn project_landing(&self) -> Option<PieceCells> {
        self.landing_piece().map(|piece| piece.cells())
    }

    /// Landing cells for display, only when the shadow is enabled
    pub fn shadow_cells(&self) -> Option<PieceCells> {
        if !self.config.shadow_enabled {
            return None;
        }
        self.project_landing()
    }

    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.hub.subscribe()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the locked cells
    pub fn snapshot_grid(&self) -> Grid {
        self.grid.clone()
    }

    pub fn active_piece(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn active_piece_cells(&self) -> Option<PieceCells> {
        self.active.map(|piece| piece.cells())
    }

    pub fn active_kind(&self) -> Option<PieceKind> {
        self.active.map(|piece| piece.kind)
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn next_piece_identity(&self) -> u8 {
        self.next.identity()
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn rows_cleared_total(&self) -> u32 {
        self.progression.rows_cleared_total()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(
            self.progression.level(),
            self.config.base_fall_ms,
            self.config.fall_floor_ms,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` in place, reusing its cell buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        self.grid.write_identities(&mut out.cells);
        out.active = self.active.map(|piece| ActiveSnapshot {
            kind: piece.kind,
            pivot: piece.pivot,
            cells: piece.cells(),
        });
        out.shadow = self.shadow_cells();
        out.next = self.next;
        out.state = self.state;
        out.score = self.progression.score();
        out.level = self.progression.level();
        out.rows_cleared = self.progression.rows_cleared_total();
        out.fall_interval_ms = self.fall_interval_ms();
    }
}
