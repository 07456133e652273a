//! Natural-language prompt sent along with each move request.

use chess_core::{Color, VerboseMove};

/// Plies of history quoted back to the model.
pub const HISTORY_PLIES: usize = 10;

pub fn build_prompt(
    turn: Color,
    fen: &str,
    legal: &[VerboseMove],
    history: &[VerboseMove],
    with_commentary: bool,
) -> String {
    let legal_san = legal
        .iter()
        .map(|m| m.san.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let recent = if history.is_empty() {
        "Game just started".to_string()
    } else {
        history[history.len().saturating_sub(HISTORY_PLIES)..]
            .iter()
            .map(|m| m.san.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let reply = if with_commentary {
        r#"Respond with ONLY a JSON object of the form {"move": "<move>", "commentary": "<one or two sentences explaining the idea>"}. The move must be in standard algebraic notation (e.g., "e4", "Nf3", "O-O") and chosen from the legal moves listed above."#
    } else {
        r#"Respond with ONLY the move in standard algebraic notation (e.g., "e4", "Nf3", "O-O"). Choose from the legal moves listed above."#
    };

    format!(
        "You are playing chess as {turn}.

Current board position (FEN): {fen}

Legal moves available: {legal_san}

Move history: {recent}

Please analyze the position and choose your best move. Consider:
- Piece safety and control of the center
- Tactical opportunities (forks, pins, skewers)
- King safety
- Material balance

{reply}"
    )
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
