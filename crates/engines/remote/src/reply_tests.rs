use super::*;

fn reply(text: &str) -> MoveReply {
    MoveReply {
        text: text.to_string(),
        commentary: None,
    }
}

#[test]
fn test_plain_json_reply() {
    let decoded = decode_reply(reply(r#"{"move":"e4","commentary":"Central control."}"#), true);
    assert_eq!(decoded.move_text, "e4");
    assert_eq!(decoded.commentary.as_deref(), Some("Central control."));
}

#[test]
fn test_json_wrapped_in_prose() {
    let decoded = decode_reply(
        reply(r#"Here you go: {"move":"Nf3","commentary":"Developing."}"#),
        true,
    );
    assert_eq!(decoded.move_text, "Nf3");
    assert_eq!(decoded.commentary.as_deref(), Some("Developing."));
}

#[test]
fn test_braces_inside_strings_are_ignored() {
    let decoded = decode_reply(
        reply(r#"{"move":"O-O","commentary":"King safety {first}, then \"attack\"."} trailing }"#),
        true,
    );
    assert_eq!(decoded.move_text, "O-O");
    assert_eq!(
        decoded.commentary.as_deref(),
        Some(r#"King safety {first}, then "attack"."#)
    );
}

#[test]
fn test_undecodable_object_falls_back_to_text() {
    let decoded = decode_reply(reply("I like {this} move: Qh5"), true);
    assert_eq!(decoded.move_text, "I like {this} move: Qh5");
    assert_eq!(decoded.commentary, None);
}

#[test]
fn test_gateway_commentary_wins() {
    let decoded = decode_reply(
        MoveReply {
            text: r#"{"move":"d4","commentary":"inline"}"#.into(),
            commentary: Some("from gateway".into()),
        },
        true,
    );
    assert_eq!(decoded.move_text, "d4");
    assert_eq!(decoded.commentary.as_deref(), Some("from gateway"));
}

#[test]
fn test_plain_mode_keeps_text() {
    let decoded = decode_reply(reply("  e4 \n"), false);
    assert_eq!(decoded.move_text, "e4");
    assert_eq!(decoded.commentary, None);

    // Blank commentary counts as none.
    let decoded = decode_reply(
        MoveReply {
            text: "e4".into(),
            commentary: Some("   ".into()),
        },
        false,
    );
    assert_eq!(decoded.commentary, None);
}

#[test]
fn test_balanced_object() {
    assert_eq!(balanced_object(r#"{"a":{"b":1}} rest"#), Some(r#"{"a":{"b":1}}"#));
    assert_eq!(balanced_object(r#"{"a":"}"}"#), Some(r#"{"a":"}"}"#));
    assert_eq!(balanced_object(r#"{"a":1"#), None);
}
