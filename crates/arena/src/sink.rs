//! Collaborators the controller reports to: a board renderer it waits on
//! after each move, and a status sink for everything textual.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use chess_core::{Color, VerboseMove};
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::TurnClock;
use crate::stats::MatchStats;

/// One line of the move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveLogEntry {
    /// Plies played including this one.
    pub number: usize,
    pub color: Color,
    pub strategy: String,
    pub san: String,
    pub from: String,
    pub to: String,
    pub captured: Option<char>,
}

impl MoveLogEntry {
    pub fn new(number: usize, strategy: &str, mv: &VerboseMove) -> Self {
        Self {
            number,
            color: if mv.color == 'w' {
                Color::White
            } else {
                Color::Black
            },
            strategy: strategy.to_string(),
            san: mv.san.clone(),
            from: mv.from.clone(),
            to: mv.to.clone(),
            captured: mv.captured,
        }
    }
}

impl fmt::Display for MoveLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} ({}): {}",
            self.number,
            self.color.name(),
            self.strategy,
            self.san
        )?;
        if let Some(piece) = self.captured {
            write!(f, " x{}", piece.to_ascii_uppercase())?;
        }
        Ok(())
    }
}

/// Moves the pieces on screen. The controller awaits each call before it
/// continues with the turn.
#[async_trait]
pub trait BoardRenderer: Send + Sync {
    async fn on_move_applied(&self, from: &str, to: &str);
}

/// Renderer for headless runs; acknowledges immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

#[async_trait]
impl BoardRenderer for NullRenderer {
    async fn on_move_applied(&self, _from: &str, _to: &str) {}
}

/// Receives status updates. Every method defaults to doing nothing.
pub trait StatusSink: Send + Sync {
    fn status(&self, _text: &str) {}
    fn clock(&self, _clock: &TurnClock) {}
    fn move_logged(&self, _entry: &MoveLogEntry) {}
    fn log_cleared(&self) {}
    /// White's share of the evaluation bar and the score as text.
    fn eval(&self, _white_percent: f64, _score: &str) {}
    fn commentary(&self, _entry: &MoveLogEntry, _text: &str) {}
    fn commentary_cleared(&self) {}
    fn stats(&self, _stats: &MatchStats) {}
    fn summary(&self, _line: &str) {}
}

/// Writes the status stream to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn status(&self, text: &str) {
        info!(target: "arena::status", "{text}");
    }

    fn clock(&self, clock: &TurnClock) {
        debug!(target: "arena::status", "clock {clock}");
    }

    fn move_logged(&self, entry: &MoveLogEntry) {
        info!(target: "arena::moves", "{entry}");
    }

    fn eval(&self, white_percent: f64, score: &str) {
        debug!(target: "arena::status", "eval {score} ({white_percent:.0}% white)");
    }

    fn commentary(&self, entry: &MoveLogEntry, text: &str) {
        info!(target: "arena::commentary", "{} {}: {text}", entry.color.name(), entry.san);
    }

    fn stats(&self, stats: &MatchStats) {
        info!(target: "arena::status", "{stats}");
    }

    fn summary(&self, line: &str) {
        info!(target: "arena::moves", "{line}");
    }
}

/// Keeps the status stream in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<MemoryLog>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    pub statuses: Vec<String>,
    pub moves: Vec<MoveLogEntry>,
    /// Commentary currently on show.
    pub commentary: Option<String>,
    pub summaries: Vec<String>,
    pub last_clock: Option<TurnClock>,
    pub last_eval: Option<f64>,
    pub last_stats: Option<MatchStats>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MemoryLog {
        self.with(|log| log.clone())
    }

    pub fn last_status(&self) -> Option<String> {
        self.with(|log| log.statuses.last().cloned())
    }

    fn with<T>(&self, f: impl FnOnce(&mut MemoryLog) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl StatusSink for MemorySink {
    fn status(&self, text: &str) {
        self.with(|log| log.statuses.push(text.to_string()));
    }

    fn clock(&self, clock: &TurnClock) {
        self.with(|log| log.last_clock = Some(*clock));
    }

    fn move_logged(&self, entry: &MoveLogEntry) {
        self.with(|log| log.moves.push(entry.clone()));
    }

    fn log_cleared(&self) {
        self.with(|log| log.moves.clear());
    }

    fn eval(&self, white_percent: f64, _score: &str) {
        self.with(|log| log.last_eval = Some(white_percent));
    }

    fn commentary(&self, _entry: &MoveLogEntry, text: &str) {
        self.with(|log| log.commentary = Some(text.to_string()));
    }

    fn commentary_cleared(&self) {
        self.with(|log| log.commentary = None);
    }

    fn stats(&self, stats: &MatchStats) {
        self.with(|log| log.last_stats = Some(*stats));
    }

    fn summary(&self, line: &str) {
        self.with(|log| log.summaries.push(line.to_string()));
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod sink_tests;
