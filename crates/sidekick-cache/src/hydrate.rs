//! Startup scan that rebuilds the memory index from disk

use crate::disk::DiskStore;
use crate::types::CacheEntry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Load every key directory found on disk.
///
/// Best effort: unreadable key directories and chunk files are skipped. All
/// restored entries are stamped with the current time, so their TTL starts
/// over at restart.
pub(crate) async fn hydrate(disk: &DiskStore) -> HashMap<String, CacheEntry> {
    let mut index = HashMap::new();

    let keys = match disk.list_keys().await {
        Ok(keys) => keys,
        Err(e) => {
            warn!(cache_dir = ?disk.cache_dir(), error = %e, "Failed to scan cache directory");
            return index;
        }
    };

    let mut chunk_count = 0usize;
    for key in keys {
        let chunks = match disk.list_chunks(&key).await {
            Ok(chunks) => chunks,
            Err(e) => {
                debug!(key = %key, error = %e, "Skipping unreadable key directory");
                continue;
            }
        };

        let mut entry = CacheEntry::new();
        for chunk in chunks {
            match disk.read_chunk(&key, chunk).await {
                Ok(data) => {
                    entry.chunks.insert(chunk, data);
                }
                Err(e) => debug!(key = %key, index = chunk, error = %e, "Skipping unreadable chunk"),
            }
        }

        chunk_count += entry.chunks.len();
        index.insert(key, entry);
    }

    info!(keys = index.len(), chunks = chunk_count, "Hydrated cache from disk");
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_hydrate_empty_dir() {
        let dir = tempdir().unwrap();
        let disk = DiskStore::new(dir.path());
        disk.ensure_root().await.unwrap();

        assert!(hydrate(&disk).await.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_missing_dir() {
        let dir = tempdir().unwrap();
        let disk = DiskStore::new(&dir.path().join("nowhere"));

        assert!(hydrate(&disk).await.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_restores_chunks_by_index() {
        let dir = tempdir().unwrap();
        let disk = DiskStore::new(dir.path());

        disk.write_chunk("gzip::+index", 0, b"<html>").await.unwrap();
        disk.write_chunk("gzip::+index", 1, b"</html>").await.unwrap();
        disk.write_chunk("br::+about", 3, b"tail").await.unwrap();
        std::fs::write(disk.cache_dir().join("stray-file"), b"x").unwrap();
        std::fs::write(disk.key_dir("br::+about").unwrap().join("README"), b"x").unwrap();

        let index = hydrate(&disk).await;
        assert_eq!(index.len(), 2);

        let page = &index["gzip::+index"];
        assert_eq!(page.assemble(), b"<html></html>");

        let about = &index["br::+about"];
        assert_eq!(about.chunks.keys().copied().collect::<Vec<_>>(), vec![3]);
        assert!(about.age_secs() <= 1);
    }

    #[tokio::test]
    async fn test_hydrate_keeps_empty_key_dirs() {
        let dir = tempdir().unwrap();
        let disk = DiskStore::new(dir.path());
        std::fs::create_dir_all(disk.key_dir("empty").unwrap()).unwrap();

        let index = hydrate(&disk).await;
        assert!(index["empty"].chunks.is_empty());
    }
}
