//! Agent gateway server binary

#![allow(missing_docs)]

use agent_gateway::config::{Config, DEFAULT_CONFIG_PATH};
use agent_gateway::server::builder::serve;
use agent_gateway::utils::logging::init_tracing;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// HTTP gateway that forwards prompts to a resolved LLM provider
#[derive(Debug, Parser)]
#[command(name = "agent-gateway", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load(&args.config)
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;

    if let Some(host) = args.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }
    config.validate()?;

    init_tracing(config.logging());
    info!(version = agent_gateway::VERSION, "Configuration ready");

    serve(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {}", e);
        }
    }

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
