use async_trait::async_trait;
use rand::rngs::StdRng;

use crate::{error::StrategyError, game::Game, types::Move};

/// A chosen move plus optional commentary to show next to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub commentary: Option<String>,
}

impl Decision {
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            commentary: None,
        }
    }

    pub fn with_commentary(mv: Move, commentary: impl Into<String>) -> Self {
        Self {
            mv,
            commentary: Some(commentary.into()),
        }
    }
}

/// Trait every move-selection strategy implements.
///
/// Implementations must return a move drawn from `game.legal_moves()` and
/// must leave `game` untouched; the caller owns the authoritative state.
#[async_trait]
pub trait Strategy: Send + Sync {
    async fn choose_move(&self, game: &Game, rng: &mut StdRng)
    -> Result<Decision, StrategyError>;

    /// Label used in move logs.
    fn name(&self) -> &str;
}
