// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Anthropic Provider Adapter
//
// Anti-Corruption Layer for the Claude Messages API

use std::time::Duration;

use crate::domain::llm::{GenerationRequest, GenerationResponse, LLMError, LLMProvider, ProviderKind};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::transport::send_json;

const ANSWER_POINTER: &str = "/content/0/text";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub struct AnthropicAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

impl AnthropicAdapter {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LLMError> {
        let kind = ProviderKind::Claude;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LLMError::MissingApiKey(kind.api_key_var()))?;

        let model = request.model_or(kind.default_model());

        let body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.prompt.as_deref(),
            }],
        };

        let url = format!("{}/messages", self.endpoint.trim_end_matches('/'));

        debug!(provider = %kind, model, "Sending messages request");

        let builder = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body);

        let reply = send_json(kind, builder, self.timeout).await?;
        Ok(reply.into_generation(kind, model.to_string(), ANSWER_POINTER))
    }
}
