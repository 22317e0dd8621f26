// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Registry
//
// Holds one adapter per ProviderKind. The set is closed, so lookup is a
// total match rather than a map probe.

use std::sync::Arc;

use crate::domain::config::RelayConfig;
use crate::domain::llm::{LLMProvider, ProviderKind};
use anyhow::Context;
use tracing::{info, warn};

use super::anthropic::AnthropicAdapter;
use super::gemini::GeminiAdapter;
use super::openai::OpenAICompatibleAdapter;

pub struct ProviderRegistry {
    openai: Arc<dyn LLMProvider>,
    gemini: Arc<dyn LLMProvider>,
    claude: Arc<dyn LLMProvider>,
    mistral: Arc<dyn LLMProvider>,
}

impl ProviderRegistry {
    pub fn new(
        openai: Arc<dyn LLMProvider>,
        gemini: Arc<dyn LLMProvider>,
        claude: Arc<dyn LLMProvider>,
        mistral: Arc<dyn LLMProvider>,
    ) -> Self {
        Self {
            openai,
            gemini,
            claude,
            mistral,
        }
    }

    /// Build every adapter from configuration, sharing one HTTP client
    pub fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
        info!("Initializing LLM provider registry");

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build upstream HTTP client")?;

        for kind in ProviderKind::ALL {
            let settings = config.provider(kind);
            if settings.api_key.is_some() {
                info!(provider = %kind, endpoint = %settings.base_url, "Provider configured");
            } else {
                warn!(
                    provider = %kind,
                    "{} not set - requests to this provider will fail",
                    kind.api_key_var()
                );
            }
        }

        let timeout = config.upstream_timeout;
        let chat = |kind: ProviderKind| -> Arc<dyn LLMProvider> {
            let settings = config.provider(kind);
            Arc::new(OpenAICompatibleAdapter::new(
                client.clone(),
                kind,
                settings.base_url.clone(),
                settings.api_key.clone(),
                timeout,
            ))
        };

        Ok(Self {
            openai: chat(ProviderKind::OpenAI),
            mistral: chat(ProviderKind::Mistral),
            gemini: Arc::new(GeminiAdapter::new(
                client.clone(),
                config.gemini.base_url.clone(),
                config.gemini.api_key.clone(),
                timeout,
            )),
            claude: Arc::new(AnthropicAdapter::new(
                client.clone(),
                config.claude.base_url.clone(),
                config.claude.api_key.clone(),
                timeout,
            )),
        })
    }

    pub fn provider(&self, kind: ProviderKind) -> Arc<dyn LLMProvider> {
        match kind {
            ProviderKind::OpenAI => self.openai.clone(),
            ProviderKind::Gemini => self.gemini.clone(),
            ProviderKind::Claude => self.claude.clone(),
            ProviderKind::Mistral => self.mistral.clone(),
        }
    }
}
