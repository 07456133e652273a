//! Running tally of finished games.

use std::fmt;

use chess_core::{Color, Outcome};
use serde::{Deserialize, Serialize};

/// How a game ended, as scored by the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Rules(Outcome),
    /// The ply cap was reached first. Scored as a draw.
    MoveLimit,
}

impl GameEnd {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameEnd::Rules(outcome) => outcome.winner(),
            GameEnd::MoveLimit => None,
        }
    }
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnd::Rules(outcome) => fmt::Display::fmt(outcome, f),
            GameEnd::MoveLimit => f.write_str("Draw by move limit"),
        }
    }
}

/// Wins, losses and draws across games. Survives a board reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub games_played: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, end: GameEnd) {
        self.games_played += 1;
        match end.winner() {
            Some(Color::White) => self.white_wins += 1,
            Some(Color::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }
    }

    /// White's score (1 for a win, 0.5 for a draw).
    pub fn white_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.5;
        }
        (f64::from(self.white_wins) + 0.5 * f64::from(self.draws)) / f64::from(self.games_played)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Text report with the two side labels in the header.
    pub fn report(&self, white: &str, black: &str) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n\n", white, black));
        report.push_str(&format!(
            "{:<12} {:>6} {:>6} {:>6} {:>6}\n",
            "", "Games", "White", "Black", "Draws"
        ));
        report.push_str(&"-".repeat(40));
        report.push('\n');
        report.push_str(&format!(
            "{:<12} {:>6} {:>6} {:>6} {:>6}\n",
            "Total", self.games_played, self.white_wins, self.black_wins, self.draws
        ));
        report.push_str(&format!("\nWhite score: {:.1}%\n", self.white_score() * 100.0));
        report
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Games: {} | White: {} | Black: {} | Draws: {}",
            self.games_played, self.white_wins, self.black_wins, self.draws
        )
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
