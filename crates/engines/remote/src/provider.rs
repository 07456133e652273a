use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Remote text-generation providers the gateway knows how to reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    DeepSeek,
    Groq,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Claude, Provider::DeepSeek, Provider::Groq];

    /// Identifier sent to the gateway and accepted in configuration.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::DeepSeek => "deepseek",
            Provider::Groq => "groq",
        }
    }

    /// Name shown in move logs.
    pub fn label(self) -> &'static str {
        match self {
            Provider::Claude => "Claude",
            Provider::DeepSeek => "DeepSeek",
            Provider::Groq => "Groq",
        }
    }

    /// Who issues the API key, as named in the missing-key message.
    pub fn key_issuer(self) -> &'static str {
        match self {
            Provider::Claude => "Anthropic",
            Provider::DeepSeek => "DeepSeek",
            Provider::Groq => "Groq",
        }
    }

    /// Environment variable consulted when no key is configured.
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::Claude => "ANTHROPIC_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }

    pub fn max_tokens(self) -> u32 {
        150
    }

    /// `None` leaves the provider's own default in place.
    pub fn temperature(self) -> Option<f32> {
        match self {
            Provider::Claude => None,
            Provider::DeepSeek | Provider::Groq => Some(0.7),
        }
    }

    /// Whether commentary is requested when the side's config does not say.
    pub fn commentary_by_default(self) -> bool {
        matches!(self, Provider::Groq)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
