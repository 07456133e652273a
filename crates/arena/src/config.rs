//! Match configuration: a TOML file on disk, resolved into the
//! [`MatchSettings`] the controller runs with.

use std::path::Path;
use std::time::Duration;

use chess_core::Color;
use classical_engine::DEFAULT_DEPTH;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strategy::{StrategyKind, UnknownStrategy};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownStrategy(#[from] UnknownStrategy),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How one side picks its moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub strategy: StrategyKind,
    pub api_key: Option<String>,
    /// `None` leaves the provider default in place.
    pub commentary: Option<bool>,
}

impl PlayerConfig {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            api_key: None,
            commentary: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_commentary(mut self, commentary: bool) -> Self {
        self.commentary = Some(commentary);
        self
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(StrategyKind::Random)
    }
}

/// Everything the controller needs to run a match.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    /// Pause between a move landing and the next turn starting.
    pub move_delay: Duration,
    pub auto_restart: bool,
    pub restart_delay: Duration,
    /// Plies after which an unfinished game is scored as a draw.
    pub max_plies: Option<usize>,
    /// Stop running once this many games have finished.
    pub stop_after_games: Option<u32>,
    pub search_depth: u32,
    pub seed: Option<u64>,
    /// Stop the loop on a failed turn instead of pausing for the user.
    pub stop_on_error: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            white: PlayerConfig::default(),
            black: PlayerConfig::default(),
            move_delay: Duration::from_millis(1000),
            auto_restart: false,
            restart_delay: Duration::from_secs(3),
            max_plies: None,
            stop_after_games: None,
            search_depth: DEFAULT_DEPTH,
            seed: None,
            stop_on_error: false,
        }
    }
}

impl MatchSettings {
    pub fn player(&self, color: Color) -> &PlayerConfig {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn player_mut(&mut self, color: Color) -> &mut PlayerConfig {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// One side as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerSection {
    pub strategy: Option<String>,
    pub api_key: Option<String>,
    pub commentary: Option<bool>,
}

/// The config file. Every field is optional.
///
/// ```toml
/// move_delay_ms = 500
/// games = 10
///
/// [white]
/// strategy = "minimax"
///
/// [black]
/// strategy = "groq"
/// commentary = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub move_delay_ms: u64,
    pub auto_restart: bool,
    pub restart_delay_ms: u64,
    pub search_depth: u32,
    pub seed: Option<u64>,
    pub max_plies: Option<usize>,
    pub games: Option<u32>,
    pub gateway_url: String,
    pub white: PlayerSection,
    pub black: PlayerSection,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let settings = MatchSettings::default();
        Self {
            move_delay_ms: settings.move_delay.as_millis() as u64,
            auto_restart: settings.auto_restart,
            restart_delay_ms: settings.restart_delay.as_millis() as u64,
            search_depth: settings.search_depth,
            seed: None,
            max_plies: None,
            games: None,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            white: PlayerSection::default(),
            black: PlayerSection::default(),
        }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve into runtime settings, reading missing API keys from the
    /// provider's environment variable.
    pub fn settings(&self) -> Result<MatchSettings, ConfigError> {
        self.settings_with_env(|name| std::env::var(name).ok())
    }

    pub fn settings_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<MatchSettings, ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::Invalid("search_depth must be at least 1".into()));
        }
        if self.games == Some(0) {
            return Err(ConfigError::Invalid("games must be at least 1".into()));
        }
        if self.max_plies == Some(0) {
            return Err(ConfigError::Invalid("max_plies must be at least 1".into()));
        }

        Ok(MatchSettings {
            white: resolve_player(&self.white, &env)?,
            black: resolve_player(&self.black, &env)?,
            move_delay: Duration::from_millis(self.move_delay_ms),
            auto_restart: self.auto_restart || self.games.is_some(),
            restart_delay: Duration::from_millis(self.restart_delay_ms),
            max_plies: self.max_plies,
            stop_after_games: self.games,
            search_depth: self.search_depth,
            seed: self.seed,
            stop_on_error: false,
        })
    }
}

fn resolve_player(
    section: &PlayerSection,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<PlayerConfig, ConfigError> {
    let strategy = match section.strategy.as_deref() {
        Some(id) => id.parse::<StrategyKind>()?,
        None => StrategyKind::Random,
    };
    let api_key = section
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| strategy.provider().and_then(|p| env(p.env_var())));
    Ok(PlayerConfig {
        strategy,
        api_key,
        commentary: section.commentary,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
