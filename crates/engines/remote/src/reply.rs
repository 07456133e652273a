//! Turning a gateway reply into move text plus optional commentary.

use serde::Deserialize;

use crate::gateway::MoveReply;

/// Move text still to be matched against the legal moves, and commentary to
/// show with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
    pub move_text: String,
    pub commentary: Option<String>,
}

/// `{"move": ..., "commentary": ...}` as a model writes it inside its text.
#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(rename = "move")]
    text: String,
    #[serde(default)]
    commentary: Option<String>,
}

/// Commentary set by the gateway itself takes precedence. In commentary
/// mode the first JSON object found in the move text is decoded; if none
/// decodes, the whole text is used as plain move text.
pub fn decode_reply(reply: MoveReply, with_commentary: bool) -> DecodedReply {
    let gateway_commentary = non_empty(reply.commentary);
    let text = reply.text.trim();

    if with_commentary {
        if let Some(embedded) = first_object(text) {
            return DecodedReply {
                move_text: embedded.text.trim().to_string(),
                commentary: gateway_commentary.or_else(|| non_empty(embedded.commentary)),
            };
        }
    }

    DecodedReply {
        move_text: text.to_string(),
        commentary: gateway_commentary,
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn first_object(text: &str) -> Option<Embedded> {
    text.match_indices('{')
        .filter_map(|(start, _)| balanced_object(&text[start..]))
        .find_map(|candidate| serde_json::from_str(candidate).ok())
}

/// The `{...}` prefix of `text` whose braces balance, ignoring braces inside
/// string literals. `text` must start with `{`.
pub fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod reply_tests;
