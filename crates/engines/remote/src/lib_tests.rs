use super::*;
use chess_core::parse_lan;
use rand::SeedableRng;
use std::sync::Mutex;

/// Gateway double that replays one scripted answer and records requests.
struct ScriptedGateway {
    answer: Mutex<Option<Result<MoveReply, GatewayError>>>,
    seen: Mutex<Vec<MoveRequest>>,
}

impl ScriptedGateway {
    fn replying(text: &str, commentary: Option<&str>) -> Arc<Self> {
        Self::with(Ok(MoveReply {
            text: text.to_string(),
            commentary: commentary.map(str::to_string),
        }))
    }

    fn with(answer: Result<MoveReply, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            answer: Mutex::new(Some(answer)),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<MoveRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoveGateway for ScriptedGateway {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveReply, GatewayError> {
        self.seen.lock().unwrap().push(request.clone());
        self.answer
            .lock()
            .unwrap()
            .take()
            .expect("gateway called more than once")
    }
}

fn strategy(provider: Provider, gateway: Arc<ScriptedGateway>) -> RemoteStrategy {
    RemoteStrategy::new(provider, Some("key-123".into()), None, gateway)
}

async fn choose(strategy: &RemoteStrategy, game: &Game) -> Result<Decision, StrategyError> {
    strategy
        .choose_move(game, &mut StdRng::seed_from_u64(11))
        .await
}

fn lan(game: &Game, text: &str) -> Move {
    parse_lan(game.position(), text).unwrap()
}

#[tokio::test]
async fn test_missing_key_fails_before_any_request() {
    let gateway = ScriptedGateway::replying("e4", None);
    for key in [None, Some(String::new()), Some("   ".to_string())] {
        let s = RemoteStrategy::new(Provider::Claude, key, None, gateway.clone());
        let err = choose(&s, &Game::new()).await.unwrap_err();
        assert_eq!(
            err,
            StrategyError::Configuration {
                provider: "Anthropic".into()
            }
        );
        assert_eq!(err.to_string(), "Please enter your Anthropic API key");
    }
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn test_san_reply_is_played() {
    let game = Game::new();
    let gateway = ScriptedGateway::replying("e4", None);
    let decision = choose(&strategy(Provider::Claude, gateway.clone()), &game)
        .await
        .unwrap();
    assert_eq!(decision.mv, lan(&game, "e2e4"));
    assert_eq!(decision.commentary, None);

    let sent = gateway.requests();
    assert_eq!(sent.len(), 1);
    let req = &sent[0];
    assert_eq!(req.provider, Provider::Claude);
    assert_eq!(req.api_key, "key-123");
    assert_eq!(req.current_turn, "White");
    assert_eq!(req.fen, game.fen());
    assert_eq!(req.legal_moves.len(), 20);
    assert!(req.move_history.is_empty());
    assert!(!req.with_commentary);
    assert_eq!(req.max_tokens, Some(150));
    assert_eq!(req.temperature, None);
    assert!(req.prompt.as_deref().unwrap().contains("Game just started"));
}

#[tokio::test]
async fn test_decorated_and_long_algebraic_replies() {
    let game = Game::new();
    let d = choose(&strategy(Provider::DeepSeek, ScriptedGateway::replying("Nf3+", None)), &game)
        .await
        .unwrap();
    assert_eq!(d.mv, lan(&game, "g1f3"));

    let d = choose(&strategy(Provider::DeepSeek, ScriptedGateway::replying("e2e4", None)), &game)
        .await
        .unwrap();
    assert_eq!(d.mv, lan(&game, "e2e4"));
}

#[tokio::test]
async fn test_prose_reply_is_scanned() {
    let mut game = Game::new();
    for m in ["e2e4", "e7e5"] {
        let mv = lan(&game, m);
        game.play(mv).unwrap();
    }
    let gateway = ScriptedGateway::replying("I think the best move is Qh5! Great attack.", None);
    let d = choose(&strategy(Provider::DeepSeek, gateway.clone()), &game)
        .await
        .unwrap();
    assert_eq!(d.mv, lan(&game, "d1h5"));
    assert_eq!(gateway.requests()[0].move_history.len(), 2);
    assert_eq!(gateway.requests()[0].temperature, Some(0.7));
}

#[tokio::test]
async fn test_unparseable_reply_falls_back_to_legal_move() {
    let game = Game::new();
    let gateway = ScriptedGateway::replying("xyz", Some("ignored?"));
    let d = choose(&strategy(Provider::Groq, gateway), &game).await.unwrap();
    assert!(game.legal_moves().contains(&d.mv));
    assert_eq!(d.commentary, None);
}

#[tokio::test]
async fn test_groq_requests_and_decodes_commentary() {
    let game = Game::new();
    let gateway = ScriptedGateway::replying(
        r#"Here you go: {"move":"Nf3","commentary":"Developing."}"#,
        None,
    );
    let d = choose(&strategy(Provider::Groq, gateway.clone()), &game)
        .await
        .unwrap();
    assert_eq!(d.mv, lan(&game, "g1f3"));
    assert_eq!(d.commentary.as_deref(), Some("Developing."));
    assert!(gateway.requests()[0].with_commentary);
}

#[tokio::test]
async fn test_gateway_commentary_is_attached() {
    let game = Game::new();
    let gateway = ScriptedGateway::replying("d4", Some("Queen's pawn."));
    let s = RemoteStrategy::new(Provider::Claude, Some("k".into()), Some(true), gateway);
    let d = choose(&s, &game).await.unwrap();
    assert_eq!(d.mv, lan(&game, "d2d4"));
    assert_eq!(d.commentary.as_deref(), Some("Queen's pawn."));
}

#[tokio::test]
async fn test_provider_error_carries_message() {
    let gateway = ScriptedGateway::with(Err(GatewayError::Rejected {
        status: 400,
        message: Some("API key is required".into()),
    }));
    let err = choose(&strategy(Provider::DeepSeek, gateway), &Game::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StrategyError::Provider {
            provider: "DeepSeek".into(),
            message: "API key is required".into(),
        }
    );

    let gateway = ScriptedGateway::with(Err(GatewayError::Rejected {
        status: 502,
        message: None,
    }));
    let err = choose(&strategy(Provider::Groq, gateway), &Game::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Groq request failed: Groq API request failed");
}

#[tokio::test]
async fn test_game_is_not_mutated() {
    let game = Game::new();
    let before = game.fen();
    choose(&strategy(Provider::Claude, ScriptedGateway::replying("e4", None)), &game)
        .await
        .unwrap();
    assert_eq!(game.fen(), before);
    assert_eq!(game.ply_count(), 0);
}

#[test]
fn test_provider_ids_round_trip() {
    for p in Provider::ALL {
        assert_eq!(p.id().parse::<Provider>(), Ok(p));
        assert_eq!(serde_json::to_value(p).unwrap(), p.id());
    }
    assert_eq!("DeepSeek".parse::<Provider>(), Ok(Provider::DeepSeek));
    assert!("gpt".parse::<Provider>().is_err());
    assert_eq!(strategy(Provider::Groq, ScriptedGateway::replying("", None)).name(), "Groq");
}

#[tokio::test]
async fn test_undecodable_reply_is_a_provider_error() {
    let gateway = ScriptedGateway::with(Err(GatewayError::Decode("expected value".into())));
    let err = choose(&strategy(Provider::Groq, gateway), &Game::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StrategyError::Provider {
            provider: "Groq".into(),
            message: "unexpected gateway reply: expected value".into(),
        }
    );
}
