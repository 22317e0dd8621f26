// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Relay configuration
//!
//! Immutable settings read from the process environment once at startup and
//! handed explicitly to the access gate and the provider registry.
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |---|---|
//! | `APP_SECRET` | Bearer secret; unset or empty disables the access gate |
//! | `<PROVIDER>_API_KEY` | Credential for one provider, only needed when it is used |
//! | `<PROVIDER>_BASE_URL` | Override of the provider's API root |
//! | `RELAY_UPSTREAM_TIMEOUT_SECS` | Outbound timeout, `0` disables (default 120) |

use std::time::Duration;

use super::llm::ProviderKind;

pub const APP_SECRET_VAR: &str = "APP_SECRET";
pub const UPSTREAM_TIMEOUT_VAR: &str = "RELAY_UPSTREAM_TIMEOUT_SECS";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Connection settings for one provider
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct RelayConfig {
    /// Expected bearer secret, `None` for open access
    pub app_secret: Option<String>,

    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub claude: ProviderSettings,
    pub mistral: ProviderSettings,

    /// Bound on each outbound call, `None` waits indefinitely
    pub upstream_timeout: Option<Duration>,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .field("openai", &self.openai)
            .field("gemini", &self.gemini)
            .field("claude", &self.claude)
            .field("mistral", &self.mistral)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        let provider = |kind: ProviderKind| ProviderSettings {
            api_key: None,
            base_url: kind.default_base_url().to_string(),
        };

        Self {
            app_secret: None,
            openai: provider(ProviderKind::OpenAI),
            gemini: provider(ProviderKind::Gemini),
            claude: provider(ProviderKind::Claude),
            mistral: provider(ProviderKind::Mistral),
            upstream_timeout: Some(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)),
        }
    }
}

impl RelayConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let provider = |kind: ProviderKind| ProviderSettings {
            api_key: get(kind.api_key_var()),
            base_url: get(kind.base_url_var())
                .unwrap_or_else(|| kind.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let upstream_timeout = match get(UPSTREAM_TIMEOUT_VAR) {
            None => Some(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)),
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                    var: UPSTREAM_TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        Ok(Self {
            app_secret: get(APP_SECRET_VAR),
            openai: provider(ProviderKind::OpenAI),
            gemini: provider(ProviderKind::Gemini),
            claude: provider(ProviderKind::Claude),
            mistral: provider(ProviderKind::Mistral),
            upstream_timeout,
        })
    }

    pub fn provider(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Claude => &self.claude,
            ProviderKind::Mistral => &self.mistral,
        }
    }

    pub fn provider_mut(&mut self, kind: ProviderKind) -> &mut ProviderSettings {
        match kind {
            ProviderKind::OpenAI => &mut self.openai,
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::Claude => &mut self.claude,
            ProviderKind::Mistral => &mut self.mistral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.app_secret.is_none());
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.claude.base_url, "https://api.anthropic.com/v1");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_empty_secret_means_open_access() {
        let config = config_from(&[("APP_SECRET", "")]).unwrap();
        assert!(config.app_secret.is_none());

        let config = config_from(&[("APP_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.app_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_provider_keys_and_base_urls() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "g-key"),
            ("MISTRAL_BASE_URL", "http://localhost:8080/v1/"),
        ])
        .unwrap();

        assert_eq!(config.provider(ProviderKind::Gemini).api_key.as_deref(), Some("g-key"));
        assert!(config.provider(ProviderKind::Claude).api_key.is_none());
        assert_eq!(config.mistral.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_timeout_parsing() {
        let config = config_from(&[("RELAY_UPSTREAM_TIMEOUT_SECS", "15")]).unwrap();
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));

        let config = config_from(&[("RELAY_UPSTREAM_TIMEOUT_SECS", "0")]).unwrap();
        assert_eq!(config.upstream_timeout, None);

        let err = config_from(&[("RELAY_UPSTREAM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("RELAY_UPSTREAM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = config_from(&[("APP_SECRET", "s3cret"), ("OPENAI_API_KEY", "sk-live")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("sk-live"));
    }
}
