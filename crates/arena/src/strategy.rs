//! Which strategy plays a side, and how to build it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chess_core::Strategy;
use classical_engine::{MinimaxStrategy, DEFAULT_DEPTH};
use random_engine::{AggressiveStrategy, RandomStrategy};
use remote_engine::{MoveGateway, RemoteStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

pub use remote_engine::Provider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyKind {
    Random,
    Aggressive,
    Minimax,
    Remote(Provider),
}

impl StrategyKind {
    pub fn id(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Minimax => "minimax",
            StrategyKind::Remote(provider) => provider.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Random => "Random",
            StrategyKind::Aggressive => "Aggressive",
            StrategyKind::Minimax => "Minimax",
            StrategyKind::Remote(provider) => provider.label(),
        }
    }

    pub fn provider(self) -> Option<Provider> {
        match self {
            StrategyKind::Remote(provider) => Some(provider),
            _ => None,
        }
    }

    pub fn is_remote(self) -> bool {
        self.provider().is_some()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected random, aggressive, minimax, claude, deepseek or groq)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "aggressive" => Ok(StrategyKind::Aggressive),
            "minimax" => Ok(StrategyKind::Minimax),
            other => other
                .parse::<Provider>()
                .map(StrategyKind::Remote)
                .map_err(|_| UnknownStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = UnknownStrategy;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrategyKind> for String {
    fn from(kind: StrategyKind) -> Self {
        kind.id().to_string()
    }
}

/// Builds the strategy for a side from its configuration.
///
/// The controller asks once per turn, so a side's configuration can change
/// between moves. New strategies only need a [`StrategyKind`] variant and an
/// arm here.
#[derive(Clone)]
pub struct StrategySelector {
    gateway: Arc<dyn MoveGateway>,
    depth: u32,
}

impl StrategySelector {
    pub fn new(gateway: Arc<dyn MoveGateway>) -> Self {
        Self {
            gateway,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn strategy_for(&self, player: &PlayerConfig) -> Arc<dyn Strategy> {
        match player.strategy {
            StrategyKind::Random => Arc::new(RandomStrategy),
            StrategyKind::Aggressive => Arc::new(AggressiveStrategy),
            StrategyKind::Minimax => Arc::new(MinimaxStrategy::new(self.depth)),
            StrategyKind::Remote(provider) => Arc::new(RemoteStrategy::new(
                provider,
                player.api_key.clone(),
                player.commentary,
                Arc::clone(&self.gateway),
            )),
        }
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod strategy_tests;
