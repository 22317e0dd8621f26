// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Ask
//!
//! Validates an `/ask` request, picks the provider adapter and turns its
//! reply into the normalized answer.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Single straight-line dispatch, one upstream call per request

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::domain::ask::{AskRequest, AskResponse};
use crate::domain::error::RelayError;
use crate::domain::llm::ProviderKind;
use crate::infrastructure::llm::ProviderRegistry;

pub struct AskService {
    registry: Arc<ProviderRegistry>,
}

impl AskService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Input is checked before the provider name, so a request with neither
    /// prompt nor messages is rejected whatever provider it names.
    pub async fn ask(&self, request: AskRequest) -> Result<AskResponse, RelayError> {
        if !request.has_input() {
            return Err(RelayError::MissingInput);
        }

        let kind = ProviderKind::from_name(&request.provider)
            .ok_or_else(|| RelayError::UnsupportedProvider(request.provider.clone()))?;

        let provider = self.registry.provider(kind);
        let generation = request.into_generation();

        let started = Instant::now();
        let result = provider.generate(&generation).await;
        let elapsed = started.elapsed();

        metrics::histogram!("relay_upstream_duration_seconds", "provider" => kind.as_str())
            .record(elapsed.as_secs_f64());

        match result {
            Ok(response) => {
                let outcome = if response.extracted { "answered" } else { "raw_fallback" };
                metrics::counter!(
                    "relay_requests_total",
                    "provider" => kind.as_str(),
                    "outcome" => outcome
                )
                .increment(1);

                info!(
                    provider = %kind,
                    model = %response.model,
                    status = response.upstream_status,
                    latency_ms = elapsed.as_millis() as u64,
                    outcome,
                    "Answered ask request"
                );

                Ok(AskResponse {
                    answer: response.text,
                })
            }
            Err(e) => {
                metrics::counter!(
                    "relay_requests_total",
                    "provider" => kind.as_str(),
                    "outcome" => "error"
                )
                .increment(1);

                error!(
                    provider = %kind,
                    latency_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "Upstream call failed"
                );

                Err(RelayError::Upstream(e))
            }
        }
    }
}
