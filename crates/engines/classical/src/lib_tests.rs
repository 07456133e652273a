use super::*;
use rand::SeedableRng;

#[tokio::test]
async fn test_strategy_returns_legal_move() {
    let game = Game::new();
    let mut rng = StdRng::seed_from_u64(7);
    let decision = MinimaxStrategy::default()
        .choose_move(&game, &mut rng)
        .await
        .unwrap();
    assert!(game.legal_moves().contains(&decision.mv));
    assert!(decision.commentary.is_none());
}

#[tokio::test]
async fn test_strategy_ignores_rng() {
    let game = Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
        .unwrap();
    let strategy = MinimaxStrategy::new(1);
    let a = strategy
        .choose_move(&game, &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();
    let b = strategy
        .choose_move(&game, &mut StdRng::seed_from_u64(2))
        .await
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(strategy.name(), "Minimax");
}

#[tokio::test]
async fn test_strategy_reports_no_moves() {
    let game = Game::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let err = MinimaxStrategy::default()
        .choose_move(&game, &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();
    assert_eq!(err, StrategyError::NoLegalMoves);
}
