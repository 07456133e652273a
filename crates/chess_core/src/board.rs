use crate::error::{RulesError, RulesResult};
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    /// Clear rights by mask: bit 0 = K, 1 = Q, 2 = k, 3 = q.
    pub fn clear(&mut self, mask: u8) {
        self.wk &= mask & 0b0001 == 0;
        self.wq &= mask & 0b0010 == 0;
        self.bk &= mask & 0b0100 == 0;
        self.bq &= mask & 0b1000 == 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p
    }

    /// Parse a Forsyth-Edwards Notation string. The halfmove and fullmove
    /// fields are optional and default to `0` and `1`.
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        let bad = |why: &str| RulesError::InvalidFen(format!("{why} in '{fen}'"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(bad("expected at least 4 fields"));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board section needs 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| bad(&format!("invalid piece char '{ch}'")))?;
                    let sq = sq(file, rank).ok_or_else(|| bad("too many files in rank"))?;
                    board[sq as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files in rank"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files in rank"));
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("invalid side to move")),
        };

        let mut castling = CastlingRights::none();
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(bad(&format!("invalid castling char '{c}'"))),
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| bad("invalid en-passant square"))?)
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| bad("invalid halfmove clock"))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| bad("invalid fullmove number"))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Serialize the position back to FEN.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(self.side_to_move.letter());
        out.push(' ');
        let c = &self.castling;
        if !(c.wk || c.wq || c.bk || c.bq) {
            out.push('-');
        } else {
            for (on, ch) in [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')] {
                if on {
                    out.push(ch);
                }
            }
        }
        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// 8x8 grid, row 0 = rank 8, column 0 = file a (the orientation a
    /// renderer draws the board in).
    pub fn board_snapshot(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.board[(7 - row) * 8 + col];
            }
        }
        grid
    }

    /// Zobrist hash over board, side, castling and en-passant file.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for (i, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= ZOBRIST.piece_key(*pc, i as u8);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        let c = &self.castling;
        for (i, on) in [c.wk, c.wq, c.bk, c.bq].into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(ep % 8);
        }
        h
    }

    /// Fifty-move rule: 100 halfmoves without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for (i, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    let shade = (file_of(i as u8) + rank_of(i as u8)) % 2;
                    bishop_colors[shade as usize] = true;
                }
                _ => return false,
            }
        }
        if minors <= 1 {
            return true;
        }
        knights == 0 && !(bishop_colors[0] && bishop_colors[1])
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        let king = Piece {
            color: c,
            kind: PieceKind::King,
        };
        self.board
            .iter()
            .position(|&pc| pc == Some(king))
            .map(|i| i as u8)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.king_sq(c)
            .is_some_and(|ksq| self.is_square_attacked(ksq, c.other()))
    }

    /// Whether any piece of colour `by` attacks `target`.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Option<u8>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let behind = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        if [-1, 1]
            .iter()
            .any(|df| holds(sq(tf + df, tr + behind), &[PieceKind::Pawn]))
        {
            return true;
        }
        if KNIGHT_STEPS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_STEPS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for (df, dr) in dirs {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if holds(Some(s), &sliders) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }
        false
    }

    /// Play `mv` without a legality check and return what is needed to take
    /// it back. Fails only when the from-square is empty.
    pub fn make_move(&mut self, mv: Move) -> RulesResult<Undo> {
        let moved = self
            .piece_at(mv.from)
            .ok_or_else(|| RulesError::IllegalMove(format!("no piece on {}", sq_to_coord(mv.from))))?;
        let mut undo = Undo {
            captured: self.piece_at(mv.to),
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
            rook_move: None,
            ep_captured_sq: None,
        };

        if mv.is_en_passant {
            // The captured pawn sits beside the mover, on the from-rank.
            if let Some(cs) = sq(file_of(mv.to), rank_of(mv.from)) {
                undo.captured = self.piece_at(cs);
                undo.ep_captured_sq = Some(cs);
                self.set_piece(cs, None);
            }
        }

        let last_rank = matches!(rank_of(mv.to), 0 | 7);
        let placed = if moved.kind == PieceKind::Pawn && last_rank {
            Piece {
                color: moved.color,
                kind: mv.promo.unwrap_or(PieceKind::Queen),
            }
        } else {
            moved
        };
        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(placed));

        if mv.is_castle && moved.kind == PieceKind::King {
            if let Some(&(_, _, rf, rt)) = ROOK_HOPS
                .iter()
                .find(|(kf, kt, _, _)| *kf == mv.from && *kt == mv.to)
            {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                undo.rook_move = Some((rf, rt));
            }
        }

        // Any move touching a king or rook home square clears that right.
        for (home, right) in [(4, 0b0011), (7, 0b0001), (0, 0b0010), (60, 0b1100), (63, 0b0100), (56, 0b1000)] {
            if mv.from == home || mv.to == home {
                self.castling.clear(right);
            }
        }

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Ok(undo)
    }

    /// Exact inverse of [`Position::make_move`].
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));
        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

/// (king_from, king_to, rook_from, rook_to)
const ROOK_HOPS: [(u8, u8, u8, u8); 4] = [(4, 6, 7, 5), (4, 2, 0, 3), (60, 62, 63, 61), (60, 58, 56, 59)];

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
