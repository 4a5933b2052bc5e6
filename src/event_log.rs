//! Append-only JSONL log of engine events.
//!
//! One line per event, numbered with a `seq` field, written from a background
//! thread so the game loop never waits on the disk. Enabled by pointing
//! `CLASSIC_TETRIS_EVENT_LOG` at a file.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::engine::EngineEvent;

pub const EVENT_LOG_ENV: &str = "CLASSIC_TETRIS_EVENT_LOG";

#[derive(Serialize)]
struct LogRecord<'a> {
    seq: u64,
    #[serde(flatten)]
    event: &'a EngineEvent,
}

/// Log file path from the environment; unset or blank disables logging
pub fn path_from_env() -> Option<PathBuf> {
    std::env::var(EVENT_LOG_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
}

/// Write each event as one JSON line. Returns the number of records written.
pub fn write_events<W, I>(writer: &mut W, events: I) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = EngineEvent>,
{
    let mut seq = 0u64;
    let mut buf: Vec<u8> = Vec::with_capacity(256);
    for event in events {
        buf.clear();
        serde_json::to_writer(&mut buf, &LogRecord { seq, event: &event })?;
        buf.push(b'\n');
        writer.write_all(&buf)?;
        writer.flush()?;
        seq += 1;
    }
    Ok(seq)
}

/// Handle to the background writer thread
pub struct EventLog {
    path: PathBuf,
    handle: JoinHandle<io::Result<u64>>,
}

impl EventLog {
    /// Open `path` for appending and drain `events` into it on a new thread.
    ///
    /// The thread stops once every sender is gone, i.e. when the engine the
    /// receiver was subscribed to is dropped.
    pub fn spawn(path: impl AsRef<Path>, events: Receiver<EngineEvent>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open event log {}", path.display()))?;

        let handle = thread::Builder::new()
            .name("event-log".into())
            .spawn(move || {
                let mut writer = BufWriter::new(file);
                write_events(&mut writer, events)
            })
            .context("spawn event log thread")?;

        Ok(Self { path, handle })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the writer to finish and report how many records it wrote
    pub fn join(self) -> Result<u64> {
        let written = self
            .handle
            .join()
            .map_err(|_| anyhow!("event log thread panicked"))?
            .with_context(|| format!("write event log {}", self.path.display()))?;
        Ok(written)
    }
}
