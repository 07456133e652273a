//! Move selection delegated to a remote language model.
//!
//! Each turn the [`RemoteStrategy`] sends the position, the legal moves and
//! recent history to a [`MoveGateway`], then maps whatever text comes back
//! onto a legal move. Text that names no legal move is not an error: a random
//! legal move is played instead.

pub mod gateway;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod reply;

use std::sync::Arc;

use async_trait::async_trait;
use chess_core::{verbose_move, Decision, Game, Move, Strategy, StrategyError, VerboseMove};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

pub use gateway::{parse_reply, GatewayError, HttpGateway, MoveGateway, MoveReply, MoveRequest};
pub use parse::{resolve_move_text, MatchStage};
pub use provider::{Provider, UnknownProvider};
pub use reply::{decode_reply, DecodedReply};

pub struct RemoteStrategy {
    provider: Provider,
    api_key: Option<String>,
    with_commentary: bool,
    gateway: Arc<dyn MoveGateway>,
}

impl RemoteStrategy {
    /// `with_commentary` of `None` uses the provider's default.
    pub fn new(
        provider: Provider,
        api_key: Option<String>,
        with_commentary: Option<bool>,
        gateway: Arc<dyn MoveGateway>,
    ) -> Self {
        Self {
            provider,
            api_key,
            with_commentary: with_commentary.unwrap_or(provider.commentary_by_default()),
            gateway,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn credential(&self) -> Result<&str, StrategyError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StrategyError::Configuration {
                provider: self.provider.key_issuer().to_string(),
            })
    }

    fn build_request(&self, api_key: &str, game: &Game, legal: &[VerboseMove]) -> MoveRequest {
        let turn = game.side_to_move();
        let fen = game.fen();
        let history = game.verbose_history();
        MoveRequest {
            provider: self.provider,
            api_key: api_key.to_string(),
            current_turn: turn.name().to_string(),
            prompt: Some(prompt::build_prompt(
                turn,
                &fen,
                legal,
                &history,
                self.with_commentary,
            )),
            fen,
            legal_moves: legal.to_vec(),
            move_history: history,
            with_commentary: self.with_commentary,
            max_tokens: Some(self.provider.max_tokens()),
            temperature: self.provider.temperature(),
        }
    }

    fn provider_error(&self, err: GatewayError) -> StrategyError {
        let message = match err {
            GatewayError::Rejected { message: None, .. } => {
                format!("{} API request failed", self.provider.label())
            }
            other => other.to_string(),
        };
        StrategyError::Provider {
            provider: self.provider.label().to_string(),
            message,
        }
    }
}

#[async_trait]
impl Strategy for RemoteStrategy {
    async fn choose_move(&self, game: &Game, rng: &mut StdRng) -> Result<Decision, StrategyError> {
        let api_key = self.credential()?;

        let moves = game.legal_moves();
        if moves.is_empty() {
            return Err(StrategyError::NoLegalMoves);
        }
        let legal = moves
            .iter()
            .map(|&mv| verbose_move(game.position(), mv))
            .collect::<Result<Vec<_>, _>>()?;

        let request = self.build_request(api_key, game, &legal);
        let reply = self
            .gateway
            .request_move(&request)
            .await
            .map_err(|e| self.provider_error(e))?;

        let decoded = decode_reply(reply, self.with_commentary);
        let turn = game.side_to_move();
        debug!(provider = %self.provider, %turn, text = %decoded.move_text, "model suggested a move");

        match resolve_move_text(&decoded.move_text, &legal) {
            Some((idx, stage)) => {
                debug!(provider = %self.provider, san = %legal[idx].san, ?stage, "matched suggestion");
                Ok(match decoded.commentary {
                    Some(text) => Decision::with_commentary(moves[idx], text),
                    None => Decision::new(moves[idx]),
                })
            }
            None => {
                warn!(
                    provider = %self.provider,
                    %turn,
                    text = %decoded.move_text,
                    "could not parse suggestion, playing a random move"
                );
                let mv: Move = *moves.choose(rng).ok_or(StrategyError::NoLegalMoves)?;
                Ok(Decision::new(mv))
            }
        }
    }

    fn name(&self) -> &str {
        self.provider.label()
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
