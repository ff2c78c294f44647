//! Memory index backed by on-disk chunk files

use crate::disk::DiskStore;
use crate::error::{CacheError, Result};
use crate::hydrate::hydrate;
use crate::key::{sanitize_key, variant_keys};
use crate::types::{CacheEntry, CacheListing, CacheStats, StoreConfig};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Chunk cache shared between request workers.
///
/// Cloning is cheap; all clones share the same index and directory. Set,
/// Purge and Flush hold the index write lock across their disk work, so each
/// call is atomic with respect to the others.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    disk: DiskStore,
    ttl_secs: u64,
    /// Sanitized key to entry
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl Store {
    /// Open a store under `root`, creating `root/sidekick-cache` if needed and
    /// loading whatever chunks are already on disk.
    pub async fn open(root: impl AsRef<Path>, ttl_secs: u64) -> Self {
        let disk = DiskStore::new(root.as_ref());

        if let Err(e) = disk.ensure_root().await {
            error!(cache_dir = ?disk.cache_dir(), error = %e, "Failed to create cache directory");
        }

        let entries = hydrate(&disk).await;
        info!(cache_dir = ?disk.cache_dir(), ttl_secs, "Cache initialized");

        Self {
            inner: Arc::new(Inner {
                disk,
                ttl_secs,
                entries: RwLock::new(entries),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                expired: AtomicU64::new(0),
            }),
        }
    }

    pub async fn from_config(config: &StoreConfig) -> Self {
        Self::open(&config.root, config.ttl_secs).await
    }

    pub fn ttl_secs(&self) -> u64 {
        self.inner.ttl_secs
    }

    pub fn cache_dir(&self) -> &Path {
        self.inner.disk.cache_dir()
    }

    /// Read a whole value.
    ///
    /// Entries in memory are checked against the TTL; a stale entry schedules
    /// a background purge of the key's variants and reports `Expired`. Keys
    /// not in memory are read straight from their directory without any TTL
    /// check.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let key = sanitize_key(key);
        debug!(key = %key, "Getting key from cache");

        let entries = self.inner.entries.read().await;

        if let Some(entry) = entries.get(&key) {
            let age_secs = entry.age_secs().max(0) as u64;
            if age_secs > self.inner.ttl_secs {
                drop(entries);
                debug!(key = %key, age_secs, ttl_secs = self.inner.ttl_secs, "Cache entry expired");
                self.inner.expired.fetch_add(1, Ordering::Relaxed);
                self.spawn_purge(key.clone());
                return Err(CacheError::Expired(key));
            }

            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, chunks = entry.chunks.len(), "Cache hit");
            return Ok(entry.assemble());
        }

        let result = self.read_from_disk(&key).await;
        drop(entries);

        match &result {
            Ok(_) => {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache hit on disk");
            }
            Err(_) => {
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
            }
        }
        result
    }

    /// Concatenate a key's chunk files in index order. Any IO failure counts
    /// as the key not being cached.
    async fn read_from_disk(&self, key: &str) -> Result<Vec<u8>> {
        let disk = &self.inner.disk;
        let not_found = |e: std::io::Error| {
            debug!(key = %key, error = %e, "Key not found on disk");
            CacheError::NotFound(key.to_string())
        };

        let mut content = Vec::new();
        for index in disk.list_chunks(key).await.map_err(not_found)? {
            let chunk = disk.read_chunk(key, index).await.map_err(not_found)?;
            content.extend_from_slice(&chunk);
        }
        Ok(content)
    }

    /// Store one chunk of a value.
    ///
    /// The first chunk written for a key starts its TTL; later chunks do not
    /// extend it. Disk write failures are logged and otherwise ignored.
    pub async fn set(&self, key: &str, index: u64, value: &[u8]) -> Result<()> {
        let key = sanitize_key(key);
        debug!(key = %key, index, size = value.len(), "Setting key in cache");

        let mut entries = self.inner.entries.write().await;
        entries
            .entry(key.clone())
            .or_default()
            .chunks
            .insert(index, value.to_vec());

        if let Err(e) = self.inner.disk.write_chunk(&key, index, value).await {
            error!(key = %key, index, error = %e, "Error writing to cache");
        }

        Ok(())
    }

    /// Remove the `br::` and `gzip::` variants of `key` from memory and disk.
    /// The bare key itself is left alone.
    pub async fn purge(&self, key: &str) {
        let key = sanitize_key(key);
        debug!(key = %key, "Removing key variants from cache");

        let mut entries = self.inner.entries.write().await;
        for variant in variant_keys(&key) {
            entries.remove(&variant);

            match self.inner.disk.remove_key(&variant).await {
                Ok(true) => info!(key = %variant, "Removed cached variant"),
                Ok(false) => {}
                Err(e) => error!(key = %variant, error = %e, "Failed to remove cached variant"),
            }
        }
    }

    fn spawn_purge(&self, key: String) {
        let store = self.clone();
        tokio::spawn(async move {
            store.purge(&key).await;
        });
    }

    /// Drop everything, in memory and on disk.
    ///
    /// The memory index is cleared even when the directory cannot be removed,
    /// in which case the error is returned and stale files stay on disk.
    pub async fn flush(&self) -> Result<()> {
        let mut entries = self.inner.entries.write().await;
        entries.clear();
        self.inner.hits.store(0, Ordering::Relaxed);
        self.inner.misses.store(0, Ordering::Relaxed);
        self.inner.expired.store(0, Ordering::Relaxed);

        if let Err(e) = self.inner.disk.reset().await {
            error!(cache_dir = ?self.cache_dir(), error = %e, "Error flushing cache");
            return Err(e.into());
        }

        info!(cache_dir = ?self.cache_dir(), "Cache flushed");
        Ok(())
    }

    /// Keys held in memory plus the raw top-level listing of the cache directory
    pub async fn list(&self) -> CacheListing {
        let entries = self.inner.entries.read().await;
        let memory = entries.keys().cloned().collect();

        let disk = match self.inner.disk.list_root().await {
            Ok(names) => names,
            Err(e) => {
                warn!(cache_dir = ?self.cache_dir(), error = %e, "Failed to list cache directory");
                Vec::new()
            }
        };

        CacheListing { memory, disk }
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.inner.entries.read().await;
        CacheStats {
            entries: entries.len(),
            chunks: entries.values().map(|e| e.chunks.len()).sum(),
            total_size: entries.values().map(CacheEntry::size).sum(),
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            expired: self.inner.expired.load(Ordering::Relaxed),
        }
    }
}
