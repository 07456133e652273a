//! Baseline strategies that need no evaluation:
//! - [`RandomStrategy`] plays any legal move
//! - [`AggressiveStrategy`] plays any capture when one exists

use async_trait::async_trait;
use chess_core::{Decision, Game, Move, Position, Strategy, StrategyError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;


/// Uniform choice over all legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

#[async_trait]
impl Strategy for RandomStrategy {
    async fn choose_move(&self, game: &Game, rng: &mut StdRng) -> Result<Decision, StrategyError> {
        let moves = game.legal_moves();
        let mv = moves.choose(rng).ok_or(StrategyError::NoLegalMoves)?;
        Ok(Decision::new(*mv))
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Uniform choice over captures (en passant included); falls back to any
/// legal move when nothing can be taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveStrategy;

#[async_trait]
impl Strategy for AggressiveStrategy {
    async fn choose_move(&self, game: &Game, rng: &mut StdRng) -> Result<Decision, StrategyError> {
        let moves = game.legal_moves();
        let captures: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| is_capture(game.position(), mv))
            .collect();
        let pool = if captures.is_empty() { &moves } else { &captures };
        let mv = pool.choose(rng).ok_or(StrategyError::NoLegalMoves)?;
        Ok(Decision::new(*mv))
    }

    fn name(&self) -> &str {
        "Aggressive"
    }
}

pub fn is_capture(pos: &Position, mv: Move) -> bool {
    mv.is_en_passant || pos.piece_at(mv.to).is_some()
}
