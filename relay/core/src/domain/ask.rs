// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Ask contract
//
// The caller-facing request and response bodies of `POST /ask`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::llm::GenerationRequest;

pub const DEFAULT_PROVIDER: &str = "openai";

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// A single conversation turn, kept as the caller sent it.
///
/// Only `role` is required. Every other field (`content`, `tool_calls`,
/// `tool_call_id`, `name`, ...) is forwarded untouched and in its original
/// order, so turns without `content` pass through as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ChatMessage {
    fields: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message `role` must be a string")]
    InvalidRole,
}

impl ChatMessage {
    pub fn user(content: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("role".to_string(), Value::from("user"));
        fields.insert("content".to_string(), content.into());
        Self { fields }
    }

    pub fn role(&self) -> &str {
        self.fields.get("role").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl TryFrom<Map<String, Value>> for ChatMessage {
    type Error = MessageError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("role") {
            Some(Value::String(_)) => Ok(Self { fields }),
            _ => Err(MessageError::InvalidRole),
        }
    }
}

impl From<ChatMessage> for Map<String, Value> {
    fn from(message: ChatMessage) -> Self {
        message.fields
    }
}

/// Body of `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

impl Default for AskRequest {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            prompt: None,
            model: None,
            messages: None,
        }
    }
}

impl AskRequest {
    /// An empty prompt does not count; a supplied `messages` array always does.
    /// This only decides whether the request is served; the prompt itself is
    /// forwarded as supplied.
    pub fn has_input(&self) -> bool {
        let has_prompt = self.prompt.as_deref().is_some_and(|p| !p.is_empty());
        has_prompt || self.messages.is_some()
    }

    pub fn into_generation(self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt,
            model: self.model,
            messages: self.messages,
        }
    }
}

/// Normalized answer returned for every provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
