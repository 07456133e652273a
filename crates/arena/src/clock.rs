//! Thinking time spent by each side.

use std::fmt;
use std::time::Duration;

use chess_core::Color;

/// Time each side has spent choosing moves. Grows once per completed turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnClock {
    white: Duration,
    black: Duration,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: Color, elapsed: Duration) {
        match color {
            Color::White => self.white += elapsed,
            Color::Black => self.black += elapsed,
        }
    }

    pub fn spent(&self, color: Color) -> Duration {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TurnClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "White {} | Black {}",
            format_time(self.white),
            format_time(self.black)
        )
    }
}

/// `m:ss`, with tenths while under ten seconds.
pub fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let mins = total_secs / 60;
    let secs = total_secs % 60;

    if duration.as_millis() < 10_000 {
        let tenths = duration.subsec_millis() / 100;
        format!("{}:{:02}.{}", mins, secs, tenths)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
