//! Arena CLI
//!
//! Play headless matches between two strategies and print the tally.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arena::{ArenaConfig, Controller, NullRenderer, StrategySelector, TracingSink};
use clap::Parser;
use remote_engine::HttpGateway;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Automated chess matches between move-selection strategies.
///
/// Strategies: random, aggressive, minimax, claude, deepseek, groq.
/// Remote strategies read their API key from the config file or from
/// ANTHROPIC_API_KEY, DEEPSEEK_API_KEY and GROQ_API_KEY.
#[derive(Parser)]
#[command(name = "arena")]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategy playing White.
    #[arg(short, long)]
    white: Option<String>,

    /// Strategy playing Black.
    #[arg(short, long)]
    black: Option<String>,

    /// Number of games to play (default 1).
    #[arg(short, long)]
    games: Option<u32>,

    /// Pause between moves in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for reproducible matches.
    #[arg(long)]
    seed: Option<u64>,

    /// Minimax search depth.
    #[arg(short, long)]
    depth: Option<u32>,

    /// Base URL of the move gateway.
    #[arg(long)]
    gateway: Option<String>,

    /// Score a game as a draw after this many plies.
    #[arg(long)]
    max_plies: Option<usize>,

    /// Print the final stats as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply_to(self, config: &mut ArenaConfig) {
        if let Some(white) = self.white {
            config.white.strategy = Some(white);
        }
        if let Some(black) = self.black {
            config.black.strategy = Some(black);
        }
        if let Some(games) = self.games {
            config.games = Some(games);
        }
        if let Some(delay) = self.delay_ms {
            config.move_delay_ms = delay;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if let Some(url) = self.gateway {
            config.gateway_url = url;
        }
        if let Some(max) = self.max_plies {
            config.max_plies = Some(max);
        }
        // A headless run always ends.
        if config.games.is_none() {
            config.games = Some(1);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    let mut config = match &cli.config {
        Some(path) => ArenaConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    cli.apply_to(&mut config);
    let mut settings = config.settings().context("invalid match settings")?;
    // Nobody is there to resume a paused game.
    settings.stop_on_error = true;

    let selector = StrategySelector::new(Arc::new(HttpGateway::new(&config.gateway_url)))
        .with_depth(settings.search_depth);
    let white = settings.white.strategy.label();
    let black = settings.black.strategy.label();
    info!(white, black, games = ?settings.stop_after_games, "starting match");

    let mut controller = Controller::new(
        settings,
        selector,
        Arc::new(NullRenderer),
        Arc::new(TracingSink),
    );
    controller.start();
    let (stats, halted) = match controller.run().await {
        Ok(stats) => (stats, None),
        Err(halted) => (halted.stats, Some(halted.message)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats.report(white, black));
    }
    match halted {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}
