// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenAI-compatible Provider Adapter
//
// Anti-Corruption Layer for chat-completions style APIs.
// Serves both OpenAI and Mistral, which share the wire format.

use std::time::Duration;

use crate::domain::ask::ChatMessage;
use crate::domain::llm::{GenerationRequest, GenerationResponse, LLMError, LLMProvider, ProviderKind};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::transport::send_json;

const ANSWER_POINTER: &str = "/choices/0/message/content";

pub struct OpenAICompatibleAdapter {
    client: reqwest::Client,
    kind: ProviderKind,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

impl OpenAICompatibleAdapter {
    pub fn new(
        client: reqwest::Client,
        kind: ProviderKind,
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            kind,
            endpoint,
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LLMError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LLMError::MissingApiKey(self.kind.api_key_var()))?;

        let model = request.model_or(self.kind.default_model());

        // Caller's conversation wins over the single-prompt form
        let messages = match &request.messages {
            Some(messages) => messages.clone(),
            None => vec![ChatMessage::user(request.prompt.clone())],
        };

        let body = ChatCompletionRequest { model, messages };
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        debug!(provider = %self.kind, model, "Sending chat completion request");

        let builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body);

        let reply = send_json(self.kind, builder, self.timeout).await?;
        Ok(reply.into_generation(self.kind, model.to_string(), ANSWER_POINTER))
    }
}
