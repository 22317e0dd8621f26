// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Provider-neutral interface the dispatcher talks to, plus the closed set of
//! upstream providers the relay knows how to reach.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Anti-corruption boundary between the `/ask` contract and vendor APIs

// Implementations live in infrastructure/llm/. Every adapter takes the same
// GenerationRequest and hands back a plain-text answer; the vendor JSON never
// leaks past the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ask::ChatMessage;

/// Domain interface for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Issue exactly one upstream call and normalize the answer
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LLMError>;
}

/// The upstream providers the relay can dispatch to.
///
/// This set is fixed at compile time. Parsing a caller-supplied name is
/// case-insensitive; anything else is an unsupported provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Gemini,
    Claude,
    Mistral,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAI,
        ProviderKind::Gemini,
        ProviderKind::Claude,
        ProviderKind::Mistral,
    ];

    /// Resolve a caller-supplied provider name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
            ProviderKind::Mistral => "mistral",
        }
    }

    /// Model used when the request carries no (or an empty) override
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-2.0-flash",
            ProviderKind::Claude => "claude-3-haiku-20240307",
            ProviderKind::Mistral => "mistral-small-latest",
        }
    }

    /// API root the adapter appends its route to
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::Claude => "https://api.anthropic.com/v1",
            ProviderKind::Mistral => "https://api.mistral.ai/v1",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Claude => "CLAUDE_API_KEY",
            ProviderKind::Mistral => "MISTRAL_API_KEY",
        }
    }

    pub fn base_url_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_BASE_URL",
            ProviderKind::Gemini => "GEMINI_BASE_URL",
            ProviderKind::Claude => "CLAUDE_BASE_URL",
            ProviderKind::Mistral => "MISTRAL_BASE_URL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an adapter needs to build its upstream body
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: Option<String>,

    /// Model override; `None` means the adapter's default
    pub model: Option<String>,

    /// Caller-supplied conversation, forwarded verbatim where the vendor accepts it
    pub messages: Option<Vec<ChatMessage>>,
}

impl GenerationRequest {
    /// Resolve the model for this call, treating an empty override as absent
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => model,
            _ => default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Answer text, or the serialized upstream body when no answer was found
    pub text: String,

    pub provider: ProviderKind,

    /// Model that was requested upstream
    pub model: String,

    /// HTTP status the provider replied with
    pub upstream_status: u16,

    /// False when `text` is the raw-body fallback
    pub extracted: bool,
}

/// Errors that can occur during an upstream call
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {provider} timed out after {timeout_secs}s")]
    Timeout {
        provider: ProviderKind,
        timeout_secs: u64,
    },

    #[error("Invalid JSON response from {provider}: {message}")]
    MalformedResponse {
        provider: ProviderKind,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ProviderKind::from_name("openai"), Some(ProviderKind::OpenAI));
        assert_eq!(ProviderKind::from_name("Gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::from_name("CLAUDE"), Some(ProviderKind::Claude));
        assert_eq!(ProviderKind::from_name("MiStRaL"), Some(ProviderKind::Mistral));
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(ProviderKind::from_name("anthropic"), None);
        assert_eq!(ProviderKind::from_name(""), None);
        assert_eq!(ProviderKind::from_name(" openai"), None);
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ProviderKind::OpenAI.default_model(), "gpt-4o-mini");
        assert_eq!(ProviderKind::Gemini.default_model(), "gemini-2.0-flash");
        assert_eq!(ProviderKind::Claude.default_model(), "claude-3-haiku-20240307");
        assert_eq!(ProviderKind::Mistral.default_model(), "mistral-small-latest");
    }

    #[test]
    fn test_model_or_ignores_empty_override() {
        let mut request = GenerationRequest::default();
        assert_eq!(request.model_or("gpt-4o-mini"), "gpt-4o-mini");

        request.model = Some(String::new());
        assert_eq!(request.model_or("gpt-4o-mini"), "gpt-4o-mini");

        request.model = Some("gpt-4o".to_string());
        assert_eq!(request.model_or("gpt-4o-mini"), "gpt-4o");
    }

    #[test]
    fn test_missing_key_message_names_variable() {
        let err = LLMError::MissingApiKey(ProviderKind::Mistral.api_key_var());
        assert_eq!(err.to_string(), "MISTRAL_API_KEY is not set");
    }
}
