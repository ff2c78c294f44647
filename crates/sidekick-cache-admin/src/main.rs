//! Sidekick cache admin - maintenance CLI for the chunk cache
//!
//! Opens the store under the configured root (hydrating it from disk) and runs
//! a single list, get, purge, flush or stats command against it.

mod cli;
mod commands;
mod error;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use sidekick_cache::Store;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. Output goes to stderr so stdout only carries results.
    let env_filter = EnvFilter::from_default_env()
        .add_directive("sidekick_cache=info".parse()?)
        .add_directive("sidekick_cache_admin=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    let cli = Cli::parse();
    let config = cli.store_config();
    info!("Cache root: {:?}", config.root);
    info!("Cache TTL: {} seconds", config.ttl_secs);

    let store = Store::from_config(&config).await;

    commands::run(&store, cli.command, &mut std::io::stdout()).await
}
