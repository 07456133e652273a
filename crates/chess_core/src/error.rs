//! Error types shared by the rules engine and every move-selection strategy.

use thiserror::Error;

/// Errors raised by the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("No move to undo")]
    NothingToUndo,
}

/// Errors a strategy can report while choosing a move.
///
/// None of these are fatal to the process: the match controller catches them
/// at the turn boundary and pauses the match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The strategy needs a credential that was not configured.
    #[error("Please enter your {provider} API key")]
    Configuration { provider: String },

    /// The remote provider answered with a non-success response.
    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    /// Search or rules bookkeeping went out of sync.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Convenience Result type for rules-engine operations
pub type RulesResult<T> = Result<T, RulesError>;
