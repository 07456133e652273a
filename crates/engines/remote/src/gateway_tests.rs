use super::*;
use chess_core::Game;
use serde_json::json;

fn request(with_commentary: bool) -> MoveRequest {
    let game = Game::new();
    MoveRequest {
        provider: Provider::DeepSeek,
        api_key: "sk-test".into(),
        current_turn: "White".into(),
        fen: game.fen(),
        legal_moves: game.verbose_legal_moves(),
        move_history: Vec::new(),
        with_commentary,
        prompt: None,
        max_tokens: Some(150),
        temperature: Some(0.7),
    }
}

#[test]
fn test_request_uses_gateway_field_names() {
    let value = serde_json::to_value(request(false)).unwrap();
    assert_eq!(value["provider"], "deepseek");
    assert_eq!(value["apiKey"], "sk-test");
    assert_eq!(value["currentTurn"], "White");
    assert_eq!(value["legalMoves"].as_array().unwrap().len(), 20);
    assert_eq!(value["legalMoves"][0]["san"], "Nc3");
    assert_eq!(value["moveHistory"], json!([]));
    assert_eq!(value["maxTokens"], 150);
    assert!(value.get("withCommentary").is_none());
    assert!(value.get("prompt").is_none());
}

#[test]
fn test_commentary_flag_only_sent_when_set() {
    let value = serde_json::to_value(request(true)).unwrap();
    assert_eq!(value["withCommentary"], true);
}

#[test]
fn test_reply_decoding() {
    let reply: MoveReply = serde_json::from_str(r#"{"move":"e4"}"#).unwrap();
    assert_eq!(reply.text, "e4");
    assert_eq!(reply.commentary, None);

    let reply: MoveReply =
        serde_json::from_str(r#"{"move":"Nf3","commentary":"Developing."}"#).unwrap();
    assert_eq!(reply.commentary.as_deref(), Some("Developing."));
}

#[test]
fn test_non_move_body_is_a_decode_error() {
    let reply = parse_reply(r#"{"move":"e4"}"#).unwrap();
    assert_eq!(reply.text, "e4");

    let err = parse_reply("<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
    assert!(err.to_string().starts_with("unexpected gateway reply: "));
}

#[test]
fn test_rejection_message() {
    let err = GatewayError::Rejected {
        status: 400,
        message: Some("API key is required".into()),
    };
    assert_eq!(err.to_string(), "API key is required");
    let err = GatewayError::Rejected {
        status: 500,
        message: None,
    };
    assert_eq!(err.to_string(), "API request failed");
}

#[test]
fn test_endpoint_joins_base_url() {
    assert_eq!(
        HttpGateway::new("http://localhost:3001/").endpoint(),
        "http://localhost:3001/api/ai-move"
    );
}
