use super::*;
use chess_core::{parse_lan, Game};

fn legal_after(moves: &[&str]) -> Vec<VerboseMove> {
    let mut game = Game::new();
    for lan in moves {
        let mv = parse_lan(game.position(), lan).unwrap();
        game.play(mv).unwrap();
    }
    game.verbose_legal_moves()
}

fn resolve_san(text: &str, legal: &[VerboseMove]) -> Option<(String, MatchStage)> {
    resolve_move_text(text, legal).map(|(i, stage)| (legal[i].san.clone(), stage))
}

#[test]
fn test_exact_san() {
    let legal = legal_after(&[]);
    assert_eq!(resolve_san("e4", &legal), Some(("e4".into(), MatchStage::ExactSan)));
    assert_eq!(resolve_san("  Nf3\n", &legal), Some(("Nf3".into(), MatchStage::ExactSan)));
}

#[test]
fn test_decorations_stripped() {
    let legal = legal_after(&[]);
    assert!(legal.iter().all(|m| m.san != "Nf3+"));
    assert_eq!(resolve_san("Nf3+", &legal), Some(("Nf3".into(), MatchStage::Undecorated)));

    // And the other way round: the legal SAN carries the check mark.
    let legal = legal_after(&["e2e4", "f7f6", "d2d4", "g7g5"]);
    assert!(legal.iter().any(|m| m.san == "Qh5#"));
    assert_eq!(resolve_san("Qh5", &legal), Some(("Qh5#".into(), MatchStage::Undecorated)));
}

#[test]
fn test_long_algebraic() {
    let legal = legal_after(&[]);
    assert_eq!(resolve_san("e2e4", &legal), Some(("e4".into(), MatchStage::LongAlgebraic)));
    assert_eq!(resolve_san("G1F3", &legal), Some(("Nf3".into(), MatchStage::LongAlgebraic)));
}

#[test]
fn test_squares_with_separators() {
    let legal = legal_after(&[]);
    assert_eq!(resolve_san("e2-e4", &legal), Some(("e4".into(), MatchStage::Squares)));
    assert_eq!(resolve_san("g1 to f3", &legal), Some(("Nf3".into(), MatchStage::Squares)));
}

#[test]
fn test_token_in_prose() {
    let legal = legal_after(&["e2e4", "e7e5"]);
    assert_eq!(
        resolve_san("I think the best move is Qh5! Great attack.", &legal),
        Some(("Qh5".into(), MatchStage::EmbeddedToken))
    );
}

#[test]
fn test_castling_token_in_prose() {
    let legal = legal_after(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert_eq!(
        resolve_san("Safety first, so O-O it is.", &legal),
        Some(("O-O".into(), MatchStage::EmbeddedToken))
    );
}

#[test]
fn test_unparseable_text() {
    let legal = legal_after(&[]);
    assert_eq!(resolve_move_text("xyz", &legal), None);
    assert_eq!(resolve_move_text("", &legal), None);
    // A SAN-shaped token that is not legal here.
    assert_eq!(resolve_move_text("I play Qh5", &legal), None);
}

#[test]
fn test_find_san_token() {
    assert_eq!(find_san_token("best is Nbd7 here"), Some("Nbd7"));
    assert_eq!(find_san_token("try exd5!"), Some("exd5"));
    assert_eq!(find_san_token("promote with e8=Q+"), Some("e8=Q"));
    assert_eq!(find_san_token("castle long: O-O-O"), Some("O-O-O"));
    assert_eq!(find_san_token("o-o"), Some("o-o"));
    assert_eq!(find_san_token("R1a3 now"), Some("R1a3"));
    assert_eq!(find_san_token("no moves here"), None);
}
