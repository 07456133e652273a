//! Authoritative game state: a position plus the stack of moves that led to
//! it, with repetition tracking and terminal-state classification.

use serde::{Deserialize, Serialize};

use crate::{
    board::{Position, Undo},
    error::{RulesError, RulesResult},
    movegen::{has_legal_move, legal_moves},
    notation::{VerboseMove, move_to_lan, verbose_move},
    types::*,
};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::Stalemate => f.write_str("Draw by stalemate"),
            Outcome::ThreefoldRepetition => f.write_str("Draw by threefold repetition"),
            Outcome::InsufficientMaterial => f.write_str("Draw by insufficient material"),
            Outcome::FiftyMoveRule => f.write_str("Draw by fifty-move rule"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    initial: Position,
    pos: Position,
    stack: Vec<(Move, Undo)>,
    /// Hash of every position reached, the current one last.
    keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(pos: Position) -> Self {
        let keys = vec![pos.position_hash()];
        Self {
            initial: pos.clone(),
            pos,
            stack: Vec::new(),
            keys,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move
    }

    pub fn in_check(&self) -> bool {
        self.pos.in_check(self.pos.side_to_move)
    }

    pub fn fen(&self) -> String {
        self.pos.to_fen()
    }

    pub fn board_snapshot(&self) -> [[Option<Piece>; 8]; 8] {
        self.pos.board_snapshot()
    }

    /// Number of half-moves applied since the initial position.
    pub fn ply_count(&self) -> usize {
        self.stack.len()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.pos)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    pub fn verbose_legal_moves(&self) -> Vec<VerboseMove> {
        self.legal_moves()
            .into_iter()
            .filter_map(|mv| verbose_move(&self.pos, mv).ok())
            .collect()
    }

    /// The moves played so far, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(mv, _)| *mv)
    }

    /// Verbose records of the moves played so far, replayed from the initial
    /// position so each carries the SAN it had when it was played.
    pub fn verbose_history(&self) -> Vec<VerboseMove> {
        let mut replay = self.initial.clone();
        let mut out = Vec::with_capacity(self.stack.len());
        for mv in self.moves() {
            match verbose_move(&replay, mv) {
                Ok(v) => out.push(v),
                Err(_) => break,
            }
            if replay.make_move(mv).is_err() {
                break;
            }
        }
        out
    }

    /// Apply a move without checking it against the legal list. Search uses
    /// this on moves it took from [`Game::legal_moves`].
    pub fn apply(&mut self, mv: Move) -> RulesResult<()> {
        let undo = self.pos.make_move(mv)?;
        self.stack.push((mv, undo));
        self.keys.push(self.pos.position_hash());
        Ok(())
    }

    /// Take back the last applied move and return it.
    pub fn undo(&mut self) -> RulesResult<Move> {
        let (mv, undo) = self.stack.pop().ok_or(RulesError::NothingToUndo)?;
        self.pos.unmake_move(mv, undo);
        self.keys.pop();
        Ok(mv)
    }

    /// Checked apply: the move must be in the current legal list. Returns the
    /// verbose record of the move as played.
    pub fn play(&mut self, mv: Move) -> RulesResult<VerboseMove> {
        if !self.is_legal(mv) {
            return Err(RulesError::IllegalMove(move_to_lan(mv)));
        }
        let record = verbose_move(&self.pos, mv)?;
        self.apply(mv)?;
        Ok(record)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !has_legal_move(&self.pos)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !has_legal_move(&self.pos)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.keys.last() else {
            return false;
        };
        self.keys.iter().filter(|&&k| k == current).count() >= 3
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !has_legal_move(&self.pos) {
            return Some(if self.in_check() {
                Outcome::Checkmate {
                    winner: self.side_to_move().other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.pos.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.pos.is_fifty_move_draw() {
            Some(Outcome::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            Some(Outcome::ThreefoldRepetition)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
