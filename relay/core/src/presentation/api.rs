// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::auth::{require_bearer, AccessGate};
use crate::application::AskService;
use crate::domain::ask::{AskRequest, AskResponse};
use crate::domain::error::RelayError;

pub const AWAKE_MESSAGE: &str = "AI Proxy Server is running ✅";

pub struct AppState {
    pub ask_service: Arc<AskService>,
}

pub fn app(service: Arc<AskService>, gate: AccessGate) -> Router {
    let state = Arc::new(AppState { ask_service: service });

    Router::new()
        .route("/", get(wake_handler))
        .route("/ask", post(ask_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(Arc::new(gate), require_bearer)),
        )
        .with_state(state)
}

async fn wake_handler() -> Json<Value> {
    Json(json!({
        "status": "awake",
        "message": AWAKE_MESSAGE,
    }))
}

async fn ask_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AskResponse>, RelayError> {
    let request = parse_ask_body(&headers, &body)?;
    let response = state.ask_service.ask(request).await?;
    Ok(Json(response))
}

/// Bodies that are empty or not labelled as JSON are read as `{}`
fn parse_ask_body(headers: &HeaderMap, body: &[u8]) -> Result<AskRequest, RelayError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AskRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        headers
    }

    #[test]
    fn test_parses_json_body() {
        let request = parse_ask_body(&json_headers(), br#"{"provider":"claude","prompt":"hi"}"#).unwrap();
        assert_eq!(request.provider, "claude");
        assert_eq!(request.prompt.as_deref(), Some("hi"));
    }

    #[test]
    fn test_empty_or_unlabelled_body_reads_as_empty_object() {
        let request = parse_ask_body(&json_headers(), b"  ").unwrap();
        assert!(!request.has_input());

        let request = parse_ask_body(&HeaderMap::new(), br#"{"prompt":"hi"}"#).unwrap();
        assert!(!request.has_input());
    }

    #[test]
    fn test_malformed_body_is_invalid() {
        let err = parse_ask_body(&json_headers(), b"{not json").unwrap_err();
        assert!(matches!(err, RelayError::InvalidBody(_)));

        let err = parse_ask_body(&json_headers(), br#"["prompt"]"#).unwrap_err();
        assert!(matches!(err, RelayError::InvalidBody(_)));
    }

    #[test]
    fn test_vendor_json_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));
        assert!(is_json(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }
}
