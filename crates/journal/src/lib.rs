//! Optional JSON-lines journal of game events.
//!
//! When `BLOCKFALL_LOG_PATH` is set, every spawn, lock, cleared row, speedup,
//! game over and quit is appended to that file as one JSON object per line:
//!
//! ```text
//! {"seq":0,"ts":1760000000000,"type":"spawn","piece":"t"}
//! {"seq":1,"ts":1760000004100,"type":"lineClear","row":409,"score":1600}
//! ```
//!
//! A path that cannot be opened is an error at startup. A journal that later
//! fails to write disables itself; the game keeps running.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

pub use blockfall_core as core;
pub use blockfall_types as types;

use crate::core::{Board, TickReport};
use crate::types::POINT_VALUE;

/// Environment variable holding the journal path
pub const LOG_PATH_ENV: &str = "BLOCKFALL_LOG_PATH";

/// Journal configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    pub log_path: Option<PathBuf>,
}

impl JournalConfig {
    /// Read [`LOG_PATH_ENV`]; unset or blank disables the journal
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(LOG_PATH_ENV).ok())
    }

    pub fn from_value(value: Option<String>) -> Self {
        let log_path = value
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        Self { log_path }
    }
}

/// One journal entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JournalEvent {
    Spawn { piece: &'static str },
    Lock { piece: &'static str },
    #[serde(rename_all = "camelCase")]
    LineClear { row: i32, score: u32 },
    #[serde(rename_all = "camelCase")]
    Speedup { speed: f64, interval_ms: u32 },
    GameOver { score: u32 },
    Quit { score: u32 },
}

impl JournalEvent {
    /// Events described by one tick, in the order they happened
    pub fn from_tick(report: &TickReport, board: &Board) -> Vec<JournalEvent> {
        let mut events = Vec::new();

        if let Some(kind) = report.spawned {
            events.push(JournalEvent::Spawn {
                piece: kind.as_str(),
            });
        }
        if let Some(kind) = report.locked {
            events.push(JournalEvent::Lock {
                piece: kind.as_str(),
            });
        }

        // The board only keeps the final score; rebuild the score after each row.
        let per_row = board.geometry().cells_per_line * POINT_VALUE;
        let cleared = report.rows_cleared.len() as u32;
        for (i, &row) in report.rows_cleared.iter().enumerate() {
            let later = cleared - 1 - i as u32;
            events.push(JournalEvent::LineClear {
                row,
                score: board.score().saturating_sub(later * per_row),
            });
        }

        if report.speedup {
            events.push(JournalEvent::Speedup {
                speed: board.speed(),
                interval_ms: board.fall_interval_ms(),
            });
        }
        if report.game_over {
            events.push(JournalEvent::GameOver {
                score: board.score(),
            });
        }
        if report.quit {
            events.push(JournalEvent::Quit {
                score: board.score(),
            });
        }
        events
    }
}

#[derive(Serialize)]
struct JournalLine<'a> {
    seq: u64,
    ts: u64,
    #[serde(flatten)]
    event: &'a JournalEvent,
}

/// Appending JSON-lines writer
pub struct Journal {
    out: Option<BufWriter<File>>,
    seq: u64,
    buf: Vec<u8>,
}

impl Journal {
    /// A journal that records nothing
    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    /// Open (or create) `path` for appending
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open journal {}", path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            seq: 0,
            buf: Vec::with_capacity(256),
        })
    }

    /// Journal for `config`; disabled when no path is set
    pub fn open(config: &JournalConfig) -> Result<Self> {
        match &config.log_path {
            Some(path) => Self::create(path),
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Number of lines written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Journal everything `report` describes; returns the number of lines written
    pub fn record(&mut self, report: &TickReport, board: &Board) -> usize {
        if !self.is_enabled() {
            return 0;
        }
        let events = JournalEvent::from_tick(report, board);
        let mut written = 0;
        for event in &events {
            if self.write(event).is_err() {
                self.out = None;
                break;
            }
            written += 1;
        }
        if written > 0 && self.flush().is_err() {
            self.out = None;
        }
        written
    }

    fn write(&mut self, event: &JournalEvent) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let line = JournalLine {
            seq: self.seq,
            ts: now_ms(),
            event,
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &line)?;
        self.buf.push(b'\n');
        out.write_all(&self.buf)?;
        self.seq += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
