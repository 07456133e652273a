//! Classical move selection: a hand-tuned evaluator and a shallow
//! alpha-beta minimax over it.

pub mod eval;
pub mod search;

use async_trait::async_trait;
use chess_core::{Decision, Game, Strategy, StrategyError};
use rand::rngs::StdRng;

pub use eval::{eval_bar_percent, evaluate, format_score, MATE_SCORE};
pub use search::{get_minimax_move, minimax, search_root, SearchOutcome, SearchStats, DEFAULT_DEPTH};

/// Picks the minimax-best move at a fixed depth.
///
/// The search runs on the caller's task and blocks it until done.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxStrategy {
    depth: u32,
}

impl MinimaxStrategy {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

#[async_trait]
impl Strategy for MinimaxStrategy {
    async fn choose_move(&self, game: &Game, _rng: &mut StdRng) -> Result<Decision, StrategyError> {
        let (mv, _) = get_minimax_move(game, self.depth)?;
        Ok(Decision::new(mv))
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
