//! Hybrid memory and disk cache for chunked response bodies
//!
//! Callers write a body as ordered chunks under a string key; readers get the
//! chunks back concatenated. Every chunk is held in an in-memory index and
//! mirrored to `{root}/sidekick-cache/{key}/{index}` so the index can be
//! rebuilt on restart. Entries expire after a fixed TTL, and the compressed
//! variants of a key (`br::` and `gzip::`) can be purged together.

mod disk;
mod error;
mod hydrate;
mod key;
mod store;
mod types;

pub use error::{CacheError, Result};
pub use key::{sanitize_key, variant_keys, Encoding, CACHE_DIR, KEY_SEPARATOR_SUBSTITUTE};
pub use store::Store;
pub use types::{CacheEntry, CacheListing, CacheStats, StoreConfig};
