// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Gemini Provider Adapter
//
// Anti-Corruption Layer for the Google Generative Language API.
// The model lives in the URL path and the key travels as a query parameter.

use std::time::Duration;

use crate::domain::llm::{GenerationRequest, GenerationResponse, LLMError, LLMProvider, ProviderKind};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::transport::send_json;

const ANSWER_POINTER: &str = "/candidates/0/content/parts/0/text";

pub struct GeminiAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

impl GeminiAdapter {
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
impl LLMProvider for GeminiAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LLMError> {
        let kind = ProviderKind::Gemini;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LLMError::MissingApiKey(kind.api_key_var()))?;

        let model = request.model_or(kind.default_model());

        // Only the prompt is sent; a messages-only request yields an empty part
        let body = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.as_deref(),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        );

        debug!(provider = %kind, model, "Sending generateContent request");

        let builder = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&body);

        let reply = send_json(kind, builder, self.timeout).await?;
        Ok(reply.into_generation(kind, model.to_string(), ANSWER_POINTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn adapter(endpoint: String, api_key: Option<&str>) -> GeminiAdapter {
        GeminiAdapter::new(
            reqwest::Client::new(),
            endpoint,
            api_key.map(str::to_string),
            None,
        )
    }

    #[tokio::test]
    async fn test_key_in_query_and_model_in_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "g-key".into()))
            .match_body(Matcher::Json(json!({
                "contents": [{ "parts": [{ "text": "Why is the sky blue?" }] }]
            })))
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Rayleigh scattering."}],"role":"model"}}]}"#,
            )
            .create_async()
            .await;

        let provider = adapter(server.url(), Some("g-key"));
        let response = provider
            .generate(&GenerationRequest {
                prompt: Some("Why is the sky blue?".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, "Rayleigh scattering.");
        assert_eq!(response.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_model_override_changes_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-pro:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let provider = adapter(server.url(), Some("g-key"));
        let response = provider
            .generate(&GenerationRequest {
                prompt: Some("hi".into()),
                model: Some("gemini-1.5-pro".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(!response.extracted);
    }

    #[tokio::test]
    async fn test_messages_only_sends_empty_part() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({ "contents": [{ "parts": [{}] }] })))
            .with_status(400)
            .with_body(r#"{"error":{"code":400}}"#)
            .create_async()
            .await;

        let provider = adapter(server.url(), Some("g-key"));
        let response = provider
            .generate(&GenerationRequest {
                messages: Some(vec![crate::domain::ask::ChatMessage::user("hi")]),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, r#"{"error":{"code":400}}"#);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_sent_as_is() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({ "contents": [{ "parts": [{ "text": "" }] }] })))
            .with_status(400)
            .with_body(r#"{"error":{"code":400}}"#)
            .create_async()
            .await;

        let provider = adapter(server.url(), Some("g-key"));
        let response = provider
            .generate(&GenerationRequest {
                prompt: Some(String::new()),
                messages: Some(vec![crate::domain::ask::ChatMessage::user("hi")]),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, r#"{"error":{"code":400}}"#);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let provider = adapter("http://127.0.0.1:9".into(), None);
        let err = provider
            .generate(&GenerationRequest {
                prompt: Some("hi".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LLMError::MissingApiKey("GEMINI_API_KEY")));
    }
}
