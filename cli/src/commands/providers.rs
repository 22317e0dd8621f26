// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Provider overview command

use anyhow::{Context, Result};
use colored::Colorize;

use relay_core::domain::config::RelayConfig;
use relay_core::domain::llm::ProviderKind;

/// One line of the provider overview
#[derive(Debug, PartialEq, Eq)]
pub struct ProviderRow {
    pub name: &'static str,
    pub default_model: &'static str,
    pub endpoint: String,
    pub key_var: &'static str,
    pub key_set: bool,
}

pub fn provider_rows(config: &RelayConfig) -> Vec<ProviderRow> {
    ProviderKind::ALL
        .into_iter()
        .map(|kind| {
            let settings = config.provider(kind);
            ProviderRow {
                name: kind.as_str(),
                default_model: kind.default_model(),
                endpoint: settings.base_url.clone(),
                key_var: kind.api_key_var(),
                key_set: settings.api_key.is_some(),
            }
        })
        .collect()
}

pub fn handle_command() -> Result<()> {
    let config = RelayConfig::from_env().context("Failed to load configuration")?;

    println!("{}", "Providers:".bold());
    println!();

    for row in provider_rows(&config) {
        let key = if row.key_set {
            "configured".green()
        } else {
            format!("{} not set", row.key_var).yellow()
        };
        println!(
            "  {:<8} {:<26} {}",
            row.name.bold(),
            row.default_model,
            row.endpoint.dimmed()
        );
        println!("           key: {}", key);
    }

    println!();
    let auth = if config.app_secret.is_some() {
        "bearer token required".green()
    } else {
        "open (APP_SECRET not set)".yellow()
    };
    println!("{} {}", "Access:".bold(), auth);

    match config.upstream_timeout {
        Some(timeout) => println!("{} {}s", "Upstream timeout:".bold(), timeout.as_secs()),
        None => println!("{} {}", "Upstream timeout:".bold(), "none".yellow()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_every_provider() {
        let mut config = RelayConfig::default();
        config.gemini.api_key = Some("g-key".into());

        let rows = provider_rows(&config);
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, ["openai", "gemini", "claude", "mistral"]);

        assert!(!rows[0].key_set);
        assert!(rows[1].key_set);
        assert_eq!(rows[2].key_var, "CLAUDE_API_KEY");
        assert_eq!(rows[3].endpoint, "https://api.mistral.ai/v1");
    }
}
