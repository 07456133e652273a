//! Minimax search with alpha-beta pruning over the rules engine's
//! apply/undo interface.

use chess_core::{Color, Game, Move, Outcome, StrategyError};
use tracing::debug;

use crate::eval::evaluate;

/// Plies searched below each root move.
pub const DEFAULT_DEPTH: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root moves included.
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: i32,
    pub stats: SearchStats,
}

/// Best move for the side to move and its score. White maximizes, Black
/// minimizes; on equal scores the earlier move in generation order wins.
///
/// Searches a scratch copy, so `game` itself is never modified.
pub fn get_minimax_move(game: &Game, depth: u32) -> Result<(Move, i32), StrategyError> {
    search_root(game, depth).map(|out| (out.best_move, out.score))
}

/// Like [`get_minimax_move`] but also reports search statistics.
pub fn search_root(game: &Game, depth: u32) -> Result<SearchOutcome, StrategyError> {
    let mut scratch = game.clone();
    let moves = scratch.legal_moves();
    let Some(&first) = moves.first() else {
        return Err(StrategyError::NoLegalMoves);
    };

    let maximizing = scratch.side_to_move() == Color::White;
    let ply_base = game.ply_count() as u32;
    let mut stats = SearchStats::default();
    let mut best = (first, if maximizing { i32::MIN } else { i32::MAX });

    for mv in moves {
        let score = branch(&mut scratch, mv, &mut stats, |g, stats| {
            search(g, depth, i32::MIN, i32::MAX, !maximizing, ply_base, stats)
        })?;
        let better = if maximizing { score > best.1 } else { score < best.1 };
        if better {
            best = (mv, score);
        }
    }

    debug!(
        depth,
        nodes = stats.nodes,
        score = best.1,
        "minimax search finished"
    );
    Ok(SearchOutcome {
        best_move: best.0,
        score: best.1,
        stats,
    })
}

/// Score `game` to `depth` plies. `maximizing` is true when the side to move
/// at this node is the one trying to raise the score. `ply_base` is the game
/// ply the evaluator sees at every leaf.
pub fn minimax(
    game: &mut Game,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    ply_base: u32,
) -> Result<i32, StrategyError> {
    search(game, depth, alpha, beta, maximizing, ply_base, &mut SearchStats::default())
}

fn search(
    game: &mut Game,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ply_base: u32,
    stats: &mut SearchStats,
) -> Result<i32, StrategyError> {
    if depth == 0 || game.is_terminal() {
        return Ok(leaf_score(game, ply_base));
    }

    let moves = game.legal_moves();
    if moves.is_empty() {
        return Err(StrategyError::Invariant(format!(
            "non-terminal position without legal moves: {}",
            game.fen()
        )));
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let score = branch(game, mv, stats, |g, stats| {
            search(g, depth - 1, alpha, beta, !maximizing, ply_base, stats)
        })?;
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    Ok(best)
}

/// Apply `mv`, run `f` on the child position, then take the move back
/// whatever `f` returned.
fn branch<F>(game: &mut Game, mv: Move, stats: &mut SearchStats, f: F) -> Result<i32, StrategyError>
where
    F: FnOnce(&mut Game, &mut SearchStats) -> Result<i32, StrategyError>,
{
    game.apply(mv)?;
    stats.nodes += 1;
    let score = f(game, stats);
    match game.undo() {
        Ok(undone) if undone == mv => score,
        Ok(undone) => Err(StrategyError::Invariant(format!(
            "undo returned {undone:?}, expected {mv:?}"
        ))),
        Err(e) => Err(StrategyError::Invariant(format!("undo failed: {e}"))),
    }
}

pub(crate) fn leaf_score(game: &Game, ply_base: u32) -> i32 {
    match game.outcome() {
        Some(Outcome::ThreefoldRepetition) => 0,
        _ => evaluate(game.position(), ply_base),
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
