//! Static position evaluation in centipawns, positive favouring White.

use chess_core::{legal_moves, rank_of, Color, PieceKind, Position};

/// Score of a checkmated position, from the mated side's point of view.
pub const MATE_SCORE: i32 = 100_000;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 300, 300, 500, 900, 0];

// Piece-square tables from White's view: row 0 is rank 8, row 7 is rank 1.
#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

/// d4, e4, d5, e5
const CENTRE: [u8; 4] = [27, 28, 35, 36];

const BISHOP_BONUS: i32 = 10;
const ROOK_SEVENTH_BONUS: i32 = 20;
const EARLY_QUEEN_PENALTY: i32 = 10;
const DEVELOPMENT_BONUS: i32 = 15;
const CENTRE_BONUS: i32 = 30;
const CENTRAL_KING_PENALTY: i32 = 30;
const MOBILITY_PER_MOVE: i32 = 2;

/// Plies before which an early queen sortie is penalised, and after which a
/// king on the c..f files is.
const OPENING_PLIES: u32 = 10;

/// Evaluate `pos` with `ply` half-moves played in the game so far.
///
/// Checkmate scores `-MATE_SCORE` when White is mated and `MATE_SCORE` when
/// Black is; stalemate and the position-level draws score 0.
pub fn evaluate(pos: &Position, ply: u32) -> i32 {
    let moves = legal_moves(pos).len() as i32;
    let stm = pos.side_to_move;

    if moves == 0 {
        return if pos.in_check(stm) {
            -sign(stm) * MATE_SCORE
        } else {
            0
        };
    }
    if pos.is_insufficient_material() || pos.is_fifty_move_draw() {
        return 0;
    }

    let mut score = 0;
    for sq in 0..64u8 {
        let Some(pc) = pos.piece_at(sq) else {
            continue;
        };
        score += sign(pc.color) * (PIECE_VALUES[pc.kind.idx()] + placement(sq, pc.kind, pc.color, ply));
    }

    for sq in CENTRE {
        if let Some(pc) = pos.piece_at(sq) {
            score += sign(pc.color) * CENTRE_BONUS;
        }
    }

    score + sign(stm) * moves * MOBILITY_PER_MOVE
}

/// Positional bonus for one piece, from its owner's point of view.
fn placement(sq: u8, kind: PieceKind, color: Color, ply: u32) -> i32 {
    let file = (sq % 8) as usize;
    let rank = rank_of(sq);
    // Table row as seen by the owner: its own back rank is row 7.
    let row = match color {
        Color::White => 7 - rank as usize,
        Color::Black => rank as usize,
    };
    let back_rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };

    match kind {
        PieceKind::Pawn => PAWN_TABLE[row][file],
        PieceKind::Knight => {
            let developed = if rank != back_rank { DEVELOPMENT_BONUS } else { 0 };
            KNIGHT_TABLE[row][file] + developed
        }
        PieceKind::Bishop => {
            let mut bonus = BISHOP_BONUS;
            if rank != 0 && rank != 7 {
                bonus += BISHOP_BONUS;
            }
            if rank != back_rank {
                bonus += DEVELOPMENT_BONUS;
            }
            bonus
        }
        PieceKind::Rook if row == 1 => ROOK_SEVENTH_BONUS,
        PieceKind::Queen if ply < OPENING_PLIES && row < 6 => -EARLY_QUEEN_PENALTY,
        PieceKind::King if ply > OPENING_PLIES && (2..=5).contains(&file) => -CENTRAL_KING_PENALTY,
        _ => 0,
    }
}

fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Share of the evaluation bar that belongs to White, in percent.
pub fn eval_bar_percent(score: i32) -> f64 {
    const SPAN: i32 = 1_000;
    50.0 + f64::from(score.clamp(-SPAN, SPAN)) / f64::from(SPAN) * 45.0
}

/// Score in pawns with one decimal and an explicit sign, e.g. `+0.3`.
pub fn format_score(score: i32) -> String {
    let pawns = f64::from(score) / 100.0;
    if score >= 0 {
        format!("+{pawns:.1}")
    } else {
        format!("{pawns:.1}")
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
