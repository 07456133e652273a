//! Matching free-form model output against the legal move list.
//!
//! Matchers run in order and the first hit wins:
//! 1. exact SAN
//! 2. SAN with `+` / `#` removed on both sides
//! 3. long algebraic, lower-cased
//! 4. from+to squares, after dropping everything but `a-h` and `1-8`
//! 5. the first SAN-shaped token inside longer text, re-run through 1 and 2

use chess_core::VerboseMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    ExactSan,
    Undecorated,
    LongAlgebraic,
    Squares,
    EmbeddedToken,
}

type Matcher = fn(&str, &[VerboseMove]) -> Option<usize>;

const PIPELINE: [(MatchStage, Matcher); 5] = [
    (MatchStage::ExactSan, exact_san),
    (MatchStage::Undecorated, undecorated_san),
    (MatchStage::LongAlgebraic, long_algebraic),
    (MatchStage::Squares, squares),
    (MatchStage::EmbeddedToken, embedded_token),
];

/// Index into `legal` of the move `text` names, and the stage that found it.
pub fn resolve_move_text(text: &str, legal: &[VerboseMove]) -> Option<(usize, MatchStage)> {
    let text = text.trim();
    PIPELINE
        .iter()
        .find_map(|&(stage, matcher)| matcher(text, legal).map(|idx| (idx, stage)))
}

fn exact_san(text: &str, legal: &[VerboseMove]) -> Option<usize> {
    legal.iter().position(|m| m.san == text)
}

fn undecorated_san(text: &str, legal: &[VerboseMove]) -> Option<usize> {
    let wanted = strip_decorations(text);
    legal.iter().position(|m| strip_decorations(&m.san) == wanted)
}

fn long_algebraic(text: &str, legal: &[VerboseMove]) -> Option<usize> {
    let wanted = text.to_lowercase();
    legal.iter().position(|m| m.lan == wanted)
}

fn squares(text: &str, legal: &[VerboseMove]) -> Option<usize> {
    let wanted: String = text
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='h' | '1'..='8'))
        .collect();
    legal
        .iter()
        .position(|m| format!("{}{}", m.from, m.to) == wanted)
}

fn embedded_token(text: &str, legal: &[VerboseMove]) -> Option<usize> {
    let token = find_san_token(text)?;
    exact_san(token, legal).or_else(|| undecorated_san(token, legal))
}

fn strip_decorations(san: &str) -> String {
    san.chars().filter(|&c| c != '+' && c != '#').collect()
}

#[derive(Debug, Clone, Copy)]
enum Atom {
    Piece,
    File,
    Rank,
    Capture,
    Promotion,
}

impl Atom {
    /// Bytes consumed when the atom matches at `b[pos..]`, ignoring case.
    fn match_len(self, b: &[u8], pos: usize) -> Option<usize> {
        let c = b.get(pos)?.to_ascii_lowercase();
        let hit = match self {
            Atom::Piece => matches!(c, b'k' | b'q' | b'r' | b'b' | b'n'),
            Atom::File => matches!(c, b'a'..=b'h'),
            Atom::Rank => matches!(c, b'1'..=b'8'),
            Atom::Capture => c == b'x',
            Atom::Promotion => {
                let next = b.get(pos + 1).map(u8::to_ascii_lowercase);
                return (c == b'=' && matches!(next, Some(b'q' | b'r' | b'b' | b'n'))).then_some(2);
            }
        };
        hit.then_some(1)
    }
}

/// `[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](=[QRBN])?`; the flag marks optional atoms.
const SAN_SHAPE: [(Atom, bool); 7] = [
    (Atom::Piece, true),
    (Atom::File, true),
    (Atom::Rank, true),
    (Atom::Capture, true),
    (Atom::File, false),
    (Atom::Rank, false),
    (Atom::Promotion, true),
];

const CASTLES: [&str; 2] = ["O-O-O", "O-O"];

/// Leftmost SAN-shaped token in `text`, case-insensitive. At each position
/// the piece-move shape is tried first (greedy, with backtracking), then
/// long castling, then short castling.
pub fn find_san_token(text: &str) -> Option<&str> {
    let b = text.as_bytes();
    (0..b.len()).find_map(|start| {
        let end = match_atoms(b, start, &SAN_SHAPE).or_else(|| {
            CASTLES.iter().find_map(|castle| {
                let tail = b.get(start..start + castle.len())?;
                tail.eq_ignore_ascii_case(castle.as_bytes())
                    .then_some(start + castle.len())
            })
        })?;
        text.get(start..end)
    })
}

fn match_atoms(b: &[u8], pos: usize, atoms: &[(Atom, bool)]) -> Option<usize> {
    let Some((&(atom, optional), rest)) = atoms.split_first() else {
        return Some(pos);
    };
    if let Some(end) = atom
        .match_len(b, pos)
        .and_then(|len| match_atoms(b, pos + len, rest))
    {
        return Some(end);
    }
    if optional {
        match_atoms(b, pos, rest)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod parse_tests;
