//! Terminal runner (default binary).
//!
//! Owns the periodic gravity timer: it ticks the engine every
//! `fall_interval_ms` and requeries the interval whenever the engine reports a
//! level or state change. Input, rendering and the optional event log all go
//! through the engine's public commands and events.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use classic_tetris::cli::{parse_args, CliOptions, USAGE};
use classic_tetris::core::{EngineConfig, GameSnapshot, UniformSource};
use classic_tetris::engine::{Engine, EngineEvent};
use classic_tetris::event_log::{self, EventLog};
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::EngineState;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = options.apply(EngineConfig::from_env());
    let mut engine = Engine::new(config, UniformSource::new(seed(&options)))
        .context("invalid engine configuration")?;

    let log = match event_log::path_from_env() {
        Some(path) => match EventLog::spawn(path, engine.subscribe()) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("[classic-tetris] event log disabled: {:#}", e);
                None
            }
        },
        None => None,
    };
    let timing = engine.subscribe();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, &timing);

    // Always try to restore terminal state.
    let _ = term.exit();

    // Closing the engine's senders lets the log thread finish.
    drop(engine);
    if let Some(log) = log {
        let path = log.path().display().to_string();
        match log.join() {
            Ok(written) => eprintln!("[classic-tetris] wrote {} events to {}", written, path),
            Err(e) => eprintln!("[classic-tetris] event log error: {:#}", e),
        }
    }
    result
}

fn seed(options: &CliOptions) -> u32 {
    options.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u32)
            .unwrap_or(1)
    })
}

fn run(
    term: &mut TerminalRenderer,
    engine: &mut Engine,
    timing: &Receiver<EngineEvent>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut interval = Duration::from_millis(engine.fall_interval_ms() as u64);
    let mut last_tick = Instant::now();

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.apply(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        for event in timing.try_iter() {
            if !event.affects_timing() {
                continue;
            }
            interval = Duration::from_millis(engine.fall_interval_ms() as u64);
            if event
                == (EngineEvent::StateChanged {
                    state: EngineState::Running,
                })
            {
                // Fresh gravity period after start or resume.
                last_tick = Instant::now();
            }
        }

        if engine.state() == EngineState::Running && last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            engine.tick();
        }
    }
}
