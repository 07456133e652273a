pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod strategy;
pub mod types;
pub mod zobrist;

// Rules engine surface shared by every strategy crate and the arena.
pub use board::*;
pub use error::*;
pub use game::{Game, Outcome};
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use strategy::{Decision, Strategy};
pub use types::*;
pub use zobrist::ZOBRIST;
