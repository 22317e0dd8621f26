// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # ask-relay
//!
//! Runs the relay HTTP server: `GET /` for liveness and `POST /ask` to forward
//! a prompt to OpenAI, Gemini, Claude or Mistral.
//!
//! ## Commands
//!
//! - `ask-relay` / `ask-relay serve` - start the HTTP server
//! - `ask-relay providers` - show provider endpoints and credential status
//!
//! Settings come from flags, the environment, or a `.env` file in the working
//! directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ask_relay::commands;
use ask_relay::server;

/// LLM relay - one endpoint, four providers
#[derive(Parser)]
#[command(name = "ask-relay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Interface to bind
    #[arg(long, global = true, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP port (default: 10000)
    #[arg(short, long, global = true, env = "PORT", default_value = "10000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RELAY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Expose Prometheus metrics on this port
    #[arg(long, global = true, env = "RELAY_METRICS_PORT")]
    metrics_port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    #[command(name = "serve")]
    Serve,

    /// Show configured providers
    #[command(name = "providers")]
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before parsing so env-backed flags see .env values
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Some(metrics_port) = cli.metrics_port {
                server::install_metrics_exporter(&cli.host, metrics_port)?;
            }
            server::start_server(&cli.host, cli.port).await
        }
        Commands::Providers => commands::providers::handle_command(),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
