//! Zobrist keys for repetition detection.
//!
//! A position key XORs one random value per (piece, square), one for Black to
//! move, one per castling right still held and one per en-passant file.
//! Keys are generated at compile time from a fixed seed so they are stable
//! across runs.

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    castling: [u64; 4],
    en_passant: [u64; 8],
}

const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            let (next, key) = splitmix64(state);
            state = next;
            pieces[i / 384][(i / 64) % 6][i % 64] = key;
            i += 1;
        }

        let (next, side_to_move) = splitmix64(state);
        state = next;

        let mut castling = [0u64; 4];
        let mut c = 0;
        while c < 4 {
            let (next, key) = splitmix64(state);
            state = next;
            castling[c] = key;
            c += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut f = 0;
        while f < 8 {
            let (next, key) = splitmix64(state);
            state = next;
            en_passant[f] = key;
            f += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x5EED_C0DE_2024_0001);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
