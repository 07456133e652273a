//! Automated chess matches between configurable strategies.
//!
//! This crate provides:
//! - A turn-driven game loop with pause, reset and auto-restart
//! - Strategy selection per side (random, aggressive, minimax, remote)
//! - Match statistics and per-side thinking clocks
//! - TOML configuration for headless runs

pub mod clock;
pub mod config;
pub mod controller;
pub mod sink;
pub mod stats;
pub mod strategy;

pub use clock::{format_time, TurnClock};
pub use config::{ArenaConfig, ConfigError, MatchSettings, PlayerConfig};
pub use controller::{Command, Controller, ControllerHandle, MatchHalted, Phase};
pub use sink::{BoardRenderer, MemorySink, MoveLogEntry, NullRenderer, StatusSink, TracingSink};
pub use stats::{GameEnd, MatchStats};
pub use strategy::{Provider, StrategyKind, StrategySelector, UnknownStrategy};
