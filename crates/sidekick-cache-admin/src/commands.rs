//! Admin commands run against an open store

use crate::cli::Command;
use crate::error::Result;
use serde::Serialize;
use sidekick_cache::Store;
use std::io::Write;
use tracing::info;

/// Outcome of a command that changes the cache
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

/// Run `command` and write its output to `out`
pub async fn run<W: Write>(store: &Store, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::List => {
            let listing = store.list().await;
            serde_json::to_writer_pretty(&mut *out, &listing)?;
            writeln!(out)?;
        }
        Command::Get { key } => {
            let value = store.get(&key).await?;
            out.write_all(&value)?;
        }
        Command::Purge { key } => {
            store.purge(&key).await;
            info!(key = %key, "Purged key variants");
            write_status(out, "purged", Some(key))?;
        }
        Command::Flush => {
            store.flush().await?;
            write_status(out, "flushed", None)?;
        }
        Command::Stats => {
            let stats = store.stats().await;
            serde_json::to_writer_pretty(&mut *out, &stats)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_status<W: Write>(out: &mut W, status: &'static str, key: Option<String>) -> Result<()> {
    serde_json::to_writer(&mut *out, &StatusResponse { status, key })?;
    writeln!(out)?;
    Ok(())
}
