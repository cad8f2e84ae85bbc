//! relay-authz - NIP-42 allowlist authorization server.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use relay_authz::{init_logging, Config, Service, DEFAULT_CONFIG_FILE};

/// Allowlist authorization service for Nostr relays
#[derive(Parser, Debug)]
#[command(name = "relay-authz")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_file(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;

    init_logging(config.level());

    let service = Service::from_config(&config).context("failed to create server")?;
    let bound = service.bind().await.context("failed to listen")?;

    println!(
        "NIP-42 authorization server listening on {}",
        bound.local_addr().context("failed to read listen address")?
    );

    bound.serve().await.context("failed to serve")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
