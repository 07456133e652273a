//! Headless matches driven from a config file, the way the binary runs them.

use std::sync::Arc;
use std::time::Duration;

use arena::{ArenaConfig, Controller, MemorySink, NullRenderer, Phase, StrategySelector};
use remote_engine::HttpGateway;

fn build(config: &str, stop_on_error: bool) -> (Controller, Arc<MemorySink>) {
    let config = ArenaConfig::from_toml_str(config).unwrap();
    let mut settings = config.settings_with_env(|_| None).unwrap();
    settings.stop_on_error = stop_on_error;
    let selector = StrategySelector::new(Arc::new(HttpGateway::new(&config.gateway_url)))
        .with_depth(settings.search_depth);
    let sink = Arc::new(MemorySink::new());
    let controller = Controller::new(settings, selector, Arc::new(NullRenderer), sink.clone());
    (controller, sink)
}

#[tokio::test]
async fn test_minimax_against_random() {
    let (mut controller, sink) = build(
        r#"
        move_delay_ms = 0
        restart_delay_ms = 0
        seed = 11
        max_plies = 30
        games = 2

        [white]
        strategy = "minimax"

        [black]
        strategy = "random"
        "#,
        true,
    );
    controller.start();
    let stats = controller.run().await.unwrap();

    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.white_wins + stats.black_wins + stats.draws, 2);

    let log = sink.snapshot();
    assert_eq!(log.summaries.len(), 2);
    assert!(log.summaries[1].starts_with("Game 2: "));
    assert!(log.moves.iter().all(|m| m.number <= 30));
}

#[tokio::test]
async fn test_remote_side_without_key_stops_the_game() {
    let (mut controller, sink) = build(
        r#"
        move_delay_ms = 0
        [white]
        strategy = "claude"
        "#,
        false,
    );
    controller.start();
    while controller.phase() == Phase::Running {
        assert!(controller.step().await);
    }

    assert_eq!(controller.phase(), Phase::Paused);
    assert_eq!(
        sink.last_status().as_deref(),
        Some("Error: Please enter your Anthropic API key")
    );
    assert_eq!(controller.stats().games_played, 0);
}

#[tokio::test]
async fn test_headless_run_returns_after_a_failed_turn() {
    let (mut controller, sink) = build(
        r#"
        move_delay_ms = 0
        games = 3
        [white]
        strategy = "claude"
        "#,
        true,
    );
    controller.start();
    let halted = tokio::time::timeout(Duration::from_secs(5), controller.run())
        .await
        .expect("run kept waiting after the error")
        .unwrap_err();

    assert_eq!(halted.message, "Please enter your Anthropic API key");
    assert_eq!(halted.stats.games_played, 0);
    assert_eq!(
        sink.last_status().as_deref(),
        Some("Error: Please enter your Anthropic API key")
    );
}
