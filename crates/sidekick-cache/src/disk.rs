//! On-disk persistence for cache chunks
//!
//! Layout is `{root}/sidekick-cache/{key}/{index}`, one raw file per chunk.
//! Keys passed in here are already sanitized.

use crate::key::CACHE_DIR;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub(crate) struct DiskStore {
    cache_dir: PathBuf,
}

impl DiskStore {
    pub fn new(root: &Path) -> Self {
        Self {
            cache_dir: root.join(CACHE_DIR),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory for `key`. Keys that would not name a single directory
    /// inside the cache directory (empty, `.`, `..`) are rejected.
    pub fn key_dir(&self, key: &str) -> io::Result<PathBuf> {
        if matches!(key, "" | "." | "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unusable cache key for disk storage: {:?}", key),
            ));
        }
        Ok(self.cache_dir.join(key))
    }

    pub fn chunk_path(&self, key: &str, index: u64) -> io::Result<PathBuf> {
        Ok(self.key_dir(key)?.join(index.to_string()))
    }

    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await
    }

    /// Write one chunk, creating the key directory if needed
    pub async fn write_chunk(&self, key: &str, index: u64, data: &[u8]) -> io::Result<()> {
        fs::create_dir_all(self.key_dir(key)?).await?;
        fs::write(self.chunk_path(key, index)?, data).await
    }

    pub async fn read_chunk(&self, key: &str, index: u64) -> io::Result<Vec<u8>> {
        fs::read(self.chunk_path(key, index)?).await
    }

    /// Chunk indices stored for `key`, ascending. Nested directories, files
    /// whose name is not a decimal index and entries whose type cannot be read
    /// are ignored.
    pub async fn list_chunks(&self, key: &str) -> io::Result<Vec<u64>> {
        let mut indices = Vec::new();
        let mut entries = fs::read_dir(self.key_dir(key)?).await?;

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    debug!(
                        key = %key,
                        file = ?entry.file_name(),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };
            if is_dir {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(|n| n.parse::<u64>().ok()) {
                Some(index) => indices.push(index),
                None => debug!(key = %key, file = ?name, "Skipping non-chunk file"),
            }
        }

        indices.sort_unstable();
        Ok(indices)
    }

    /// Names of the key directories under the cache directory
    pub async fn list_keys(&self) -> io::Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.cache_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(_) => continue,
            };
            if !is_dir {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                keys.push(name);
            }
        }

        Ok(keys)
    }

    /// Every top-level name under the cache directory, files and directories alike
    pub async fn list_root(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.cache_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    /// Recursively remove a key directory. Returns whether it existed.
    pub async fn remove_key(&self, key: &str) -> io::Result<bool> {
        let dir = self.key_dir(key)?;
        if fs::metadata(&dir).await.is_err() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).await?;
        Ok(true)
    }

    /// Remove the whole cache directory and recreate it empty
    pub async fn reset(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.cache_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.ensure_root().await
    }
}
