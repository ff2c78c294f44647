//! Cache types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A cached value held as sparse, ordered chunks
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub chunks: BTreeMap<u64, Vec<u8>>,
    /// Set once when the entry is created; chunk writes never refresh it
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new() -> Self {
        Self {
            chunks: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Age in epoch seconds: `now - created_at`, both truncated to the second
    pub fn age_secs(&self) -> i64 {
        Utc::now().timestamp() - self.created_at.timestamp()
    }

    /// Concatenate all chunks in ascending index order; holes are skipped
    pub fn assemble(&self) -> Vec<u8> {
        let mut content = Vec::with_capacity(self.size() as usize);
        for chunk in self.chunks.values() {
            content.extend_from_slice(chunk);
        }
        content
    }

    pub fn size(&self) -> u64 {
        self.chunks.values().map(|c| c.len() as u64).sum()
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub chunks: usize,
    pub total_size: u64,
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
}

/// Keys held in memory and top-level names found under the cache directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheListing {
    pub memory: Vec<String>,
    pub disk: Vec<String>,
}

/// Where the store lives and how long entries stay fresh
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub ttl_secs: u64,
}

impl StoreConfig {
    /// Read `CACHE_ROOT` and `CACHE_TTL_SECS`, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let root = std::env::var("CACHE_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.root);

        let ttl_secs = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.ttl_secs);

        Self { root, ttl_secs }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./cache"),
            ttl_secs: 60 * 60, // 1 hour
        }
    }
}
