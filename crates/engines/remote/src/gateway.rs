//! Wire contract with the move gateway: `POST {base}/api/ai-move`.

use async_trait::async_trait;
use chess_core::VerboseMove;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::Provider;

/// Request body. Field names and shapes follow the gateway's JSON contract;
/// `prompt`, `maxTokens` and `temperature` are extras a gateway may ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub provider: Provider,
    pub api_key: String,
    pub current_turn: String,
    pub fen: String,
    pub legal_moves: Vec<VerboseMove>,
    pub move_history: Vec<VerboseMove>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub with_commentary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Successful response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
    #[serde(rename = "move", default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Non-success status; `message` is the body's `error` field if any.
    #[error("{}", .message.as_deref().unwrap_or("API request failed"))]
    Rejected { status: u16, message: Option<String> },

    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status, but the body is not a move reply.
    #[error("unexpected gateway reply: {0}")]
    Decode(String),
}

/// Decode a success body into a [`MoveReply`].
pub fn parse_reply(body: &str) -> Result<MoveReply, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Anything that can turn a [`MoveRequest`] into a [`MoveReply`].
#[async_trait]
pub trait MoveGateway: Send + Sync {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveReply, GatewayError>;
}

/// Gateway reached over HTTP. No request timeout is set here; a hung call
/// stalls only the turn that made it.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/ai-move", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MoveGateway for HttpGateway {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveReply, GatewayError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: body.error,
            });
        }
        let body = response.text().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod gateway_tests;
