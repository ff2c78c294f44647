//! Command-line arguments

use clap::{Parser, Subcommand};
use sidekick_cache::StoreConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sidekick-cache-admin",
    about = "Inspect and maintain a sidekick chunk cache"
)]
pub struct Cli {
    /// Directory holding `sidekick-cache/` (overrides CACHE_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Entry TTL in seconds (overrides CACHE_TTL_SECS)
    #[arg(long, global = true)]
    pub ttl: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print keys held in memory and names found on disk
    List,
    /// Write a cached value to stdout
    Get { key: String },
    /// Remove the br:: and gzip:: variants of a key
    Purge { key: String },
    /// Remove every entry
    Flush,
    /// Print cache statistics
    Stats,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(ttl) = self.ttl {
            config.ttl_secs = ttl;
        }
        config
    }
}
