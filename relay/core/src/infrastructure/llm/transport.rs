// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Shared upstream plumbing for the provider adapters.
//
// A provider answering with a non-2xx status is still a reply: its JSON body
// goes through extraction like any other. Only transport failures and bodies
// that are not JSON at all become errors.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::llm::{GenerationResponse, LLMError, ProviderKind};

/// Parsed upstream reply
#[derive(Debug)]
pub(crate) struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    /// Pull the answer at `pointer`, falling back to the serialized body
    pub fn into_generation(self, provider: ProviderKind, model: String, pointer: &str) -> GenerationResponse {
        let mut body = self.body;
        integralize(&mut body);

        let (text, extracted) = match answer_at(&body, pointer) {
            Some(text) => (text, true),
            None => {
                debug!(%provider, pointer, "No answer at expected path, returning raw body");
                (body.to_string(), false)
            }
        };

        GenerationResponse {
            text,
            provider,
            model,
            upstream_status: self.status,
            extracted,
        }
    }
}

/// Send a prepared request and parse the reply as JSON
pub(crate) async fn send_json(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
    timeout: Option<Duration>,
) -> Result<UpstreamReply, LLMError> {
    let request = match timeout {
        Some(limit) => request.timeout(limit),
        None => request,
    };

    let transport_error = |e: reqwest::Error| {
        if e.is_timeout() {
            LLMError::Timeout {
                provider,
                timeout_secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else {
            LLMError::Network(e.to_string())
        }
    };

    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport_error)?;

    if !status.is_success() {
        warn!(%provider, status = status.as_u16(), "Provider returned an error status");
    }

    let body: Value = serde_json::from_slice(&bytes).map_err(|e| LLMError::MalformedResponse {
        provider,
        message: e.to_string(),
    })?;

    Ok(UpstreamReply {
        status: status.as_u16(),
        body,
    })
}

/// Answer text at a JSON pointer.
///
/// Missing, null, false, zero and empty-string values count as "no answer".
/// Any other non-string value is returned in its JSON form.
pub(crate) fn answer_at(body: &Value, pointer: &str) -> Option<String> {
    match body.pointer(pointer)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Largest integer an IEEE double holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rewrite floats with no fractional part as integers, so `1.0` renders as
/// `1` in the answer text the way JavaScript clients print it.
fn integralize(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
                    *value = Value::from(f as i64);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integralize),
        Value::Object(fields) => fields.values_mut().for_each(integralize),
        _ => {}
    }
}
