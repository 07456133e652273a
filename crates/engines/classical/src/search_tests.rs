use super::*;
use crate::eval::MATE_SCORE;
use chess_core::{move_to_lan, parse_lan};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
];

/// Plain minimax without pruning, used as the reference.
fn exhaustive(game: &mut Game, depth: u32, maximizing: bool, ply_base: u32) -> i32 {
    if depth == 0 || game.is_terminal() {
        return leaf_score(game, ply_base);
    }
    let scores = game.legal_moves().into_iter().map(|mv| {
        game.apply(mv).unwrap();
        let s = exhaustive(game, depth - 1, !maximizing, ply_base);
        game.undo().unwrap();
        s
    });
    let scores: Vec<i32> = scores.collect();
    if maximizing {
        scores.into_iter().max().unwrap()
    } else {
        scores.into_iter().min().unwrap()
    }
}

#[test]
fn test_alpha_beta_matches_exhaustive_minimax() {
    for fen in POSITIONS {
        let mut game = Game::from_fen(fen).unwrap();
        let maximizing = game.side_to_move() == Color::White;
        for depth in 1..=2 {
            let pruned = minimax(&mut game, depth, i32::MIN, i32::MAX, maximizing, 0).unwrap();
            let full = exhaustive(&mut game, depth, maximizing, 0);
            assert_eq!(pruned, full, "depth {depth} on {fen}");
        }
        assert_eq!(game.fen(), Game::from_fen(fen).unwrap().fen());
    }
}

#[test]
fn test_search_is_deterministic() {
    for fen in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let a = get_minimax_move(&game, DEFAULT_DEPTH).unwrap();
        let b = get_minimax_move(&game, DEFAULT_DEPTH).unwrap();
        assert_eq!(a, b, "{fen}");
    }
}

#[test]
fn test_root_leaves_game_untouched() {
    let game = Game::from_fen(POSITIONS[1]).unwrap();
    let before = game.fen();
    let out = search_root(&game, 1).unwrap();
    assert_eq!(game.fen(), before);
    assert_eq!(game.ply_count(), 0);
    assert!(game.legal_moves().contains(&out.best_move));
    assert!(out.stats.nodes > game.legal_moves().len() as u64);
}

#[test]
fn test_white_finds_back_rank_mate() {
    let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
    let (mv, score) = get_minimax_move(&game, DEFAULT_DEPTH).unwrap();
    assert_eq!(move_to_lan(mv), "e1e8");
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn test_black_minimizes() {
    let game = Game::from_fen("4r1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let (mv, score) = get_minimax_move(&game, DEFAULT_DEPTH).unwrap();
    assert_eq!(move_to_lan(mv), "e8e1");
    assert_eq!(score, -MATE_SCORE);
}

#[test]
fn test_free_queen_is_taken() {
    // Black queen hangs on d5 to the e4 pawn.
    let game = Game::from_fen("rnb1kbnr/pppp1ppp/8/3q4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3").unwrap();
    let (mv, _) = get_minimax_move(&game, DEFAULT_DEPTH).unwrap();
    assert_eq!(Some(mv), parse_lan(game.position(), "e4d5"));
}

#[test]
fn test_no_legal_moves_is_an_error() {
    let game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(get_minimax_move(&game, 1), Err(StrategyError::NoLegalMoves));
}

#[test]
fn test_depth_zero_scores_each_root_move_statically() {
    let game = Game::new();
    let out = search_root(&game, 0).unwrap();
    assert_eq!(out.stats.nodes, 20);
}
