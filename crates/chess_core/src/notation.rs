//! Move notation: long algebraic (`e2e4`, `e7e8q`) and standard algebraic
//! (`Nf3`, `exd5`, `O-O`, `e8=Q+`).

use serde::{Deserialize, Serialize};

use crate::{
    board::Position,
    error::{RulesError, RulesResult},
    movegen::legal_moves,
    types::*,
};

/// Display form of a move, shaped like a chess.js verbose move so it can be
/// sent to a move gateway as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerboseMove {
    pub color: char,
    pub from: String,
    pub to: String,
    pub piece: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<char>,
    /// Any of `n` normal, `b` double pawn push, `e` en passant, `c` capture,
    /// `p` promotion, `k` / `q` king- / queen-side castle.
    pub flags: String,
    pub san: String,
    pub lan: String,
}

impl VerboseMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Describe `mv` as played from `pos`.
pub fn verbose_move(pos: &Position, mv: Move) -> RulesResult<VerboseMove> {
    let piece = pos
        .piece_at(mv.from)
        .ok_or_else(|| RulesError::IllegalMove(move_to_lan(mv)))?;
    let captured = if mv.is_en_passant {
        Some(PieceKind::Pawn)
    } else {
        pos.piece_at(mv.to).map(|p| p.kind)
    };

    let mut flags = String::new();
    if piece.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
        flags.push('b');
    }
    if mv.is_en_passant {
        flags.push('e');
    } else if captured.is_some() {
        flags.push('c');
    }
    if mv.promo.is_some() {
        flags.push('p');
    }
    if mv.is_castle {
        flags.push(if mv.to > mv.from { 'k' } else { 'q' });
    }
    if flags.is_empty() {
        flags.push('n');
    }

    Ok(VerboseMove {
        color: piece.color.letter(),
        from: sq_to_coord(mv.from),
        to: sq_to_coord(mv.to),
        piece: piece.kind.letter(),
        captured: captured.map(PieceKind::letter),
        promotion: mv.promo.map(PieceKind::letter),
        flags,
        san: move_to_san(pos, mv),
        lan: move_to_lan(mv),
    })
}

/// Long algebraic form: from-square, to-square, optional promotion letter.
pub fn move_to_lan(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Parse long algebraic text and match it against the legal moves so the
/// castle/en-passant flags come from the generator, not the text.
pub fn parse_lan(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.len() {
        4 => None,
        5 => Some(PieceKind::from_letter(txt.as_bytes()[4] as char)?),
        _ => return None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && (promo.is_none() || m.promo == promo))
}

/// Standard algebraic notation for a legal move in `pos`, including the
/// check (`+`) or mate (`#`) suffix.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut san = san_body(pos, mv);

    let mut after = pos.clone();
    if after.make_move(mv).is_ok() && after.in_check(after.side_to_move) {
        if legal_moves(&after).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

fn san_body(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return move_to_lan(mv);
    };

    if mv.is_castle {
        return if mv.to > mv.from { "O-O" } else { "O-O-O" }.to_string();
    }

    let mut san = String::with_capacity(7);
    let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;

    if piece.kind == PieceKind::Pawn {
        if is_capture {
            san.push((b'a' + (mv.from % 8)) as char);
            san.push('x');
        }
    } else {
        san.push(piece.kind.letter().to_ascii_uppercase());
        san.push_str(&disambiguation(pos, mv, piece.kind));
        if is_capture {
            san.push('x');
        }
    }

    san.push_str(&sq_to_coord(mv.to));

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.letter().to_ascii_uppercase());
    }
    san
}

/// File, rank, or both, whichever first tells apart same-kind pieces that
/// can reach the same destination.
fn disambiguation(pos: &Position, mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<u8> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
        })
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let coord = sq_to_coord(mv.from);
    let same_file = rivals.iter().any(|&s| file_of(s) == file_of(mv.from));
    let same_rank = rivals.iter().any(|&s| rank_of(s) == rank_of(mv.from));
    match (same_file, same_rank) {
        (false, _) => coord[0..1].to_string(),
        (true, false) => coord[1..2].to_string(),
        (true, true) => coord,
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
