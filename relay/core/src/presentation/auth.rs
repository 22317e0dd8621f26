// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Access Gate
//
// Bearer-secret check applied in front of every route. With no secret
// configured the gate is open.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::domain::error::RelayError;

#[derive(Clone, Default)]
pub struct AccessGate {
    /// Full expected header value, `Bearer <secret>`
    expected: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            expected: secret
                .filter(|s| !s.is_empty())
                .map(|s| format!("Bearer {}", s)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.expected.is_none()
    }

    /// Whether a request carrying this `Authorization` value may pass
    pub fn permits(&self, authorization: Option<&[u8]>) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => authorization
                .map(|presented| bool::from(presented.ct_eq(expected.as_bytes())))
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("open", &self.is_open())
            .finish()
    }
}

/// Middleware: reject with 403 before the handler runs
pub async fn require_bearer(
    State(gate): State<Arc<AccessGate>>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.as_bytes());

    if !gate.permits(authorization) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present = authorization.is_some(),
            "Rejected request with bad credentials"
        );
        return RelayError::Unauthorized.into_response();
    }

    next.run(request).await
}
