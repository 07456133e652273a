use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_generation_order_is_stable() {
    let pos = Position::startpos();
    assert_eq!(legal_moves(&pos), legal_moves(&pos));
    // a1..h8 scan: the b1 knight comes before any pawn on rank 2.
    assert_eq!(legal_moves(&pos)[0].from, 1);
}

#[test]
fn test_promotion_generates_four_moves() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promos: Vec<_> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.promo.is_some())
        .collect();
    assert_eq!(promos.len(), 4);
}

#[test]
fn test_no_moves_when_mated() {
    let pos = Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();
    assert!(!has_legal_move(&pos));
}
