//! Main entry point for the community duel service
//!
//! Loads configuration from the environment, applies CLI overrides,
//! wires the store coordinator and serves the HTTP surface until ctrl-c.

use anyhow::Result;
use clap::Parser;
use community_duel::config::{validate_config, AppConfig};
use community_duel::service::{serve, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Community Duel - pairwise community voting with an ELO leaderboard
#[derive(Parser)]
#[command(
    name = "community-duel",
    version,
    about = "Pairwise community voting service with an ELO leaderboard",
    long_about = "Community Duel serves random voting pairs, records pairwise \
                  votes through a fixed-K ELO rating engine and keeps the whole \
                  community collection in a single key-value blob, with an \
                  in-memory fallback when no store directory is configured."
)]
struct Args {
    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// HTTP port override
    #[arg(short, long, value_name = "PORT", help = "Override HTTP server port")]
    port: Option<u16>,

    /// Store directory override
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for the durable store (omit for in-memory)"
    )]
    data_dir: Option<PathBuf>,

    /// Seed file override
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file replacing the built-in seed dataset"
    )]
    seed_file: Option<PathBuf>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without starting")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(log_level) = args.log_level {
        config.service.log_level = log_level;
    }
    if let Some(port) = args.port {
        config.service.http_port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.store.data_dir = Some(data_dir);
    }
    if let Some(seed_file) = args.seed_file {
        config.store.seed_file = Some(seed_file);
    }
    validate_config(&config)?;

    init_logging(&config.service.log_level)?;

    if args.dry_run {
        info!("Configuration valid; exiting (dry run)");
        return Ok(());
    }

    info!(
        service = %config.service.name,
        version = community_duel::VERSION,
        "Starting community duel service"
    );

    let state = Arc::new(AppState::new(config)?);
    serve(state).await
}
