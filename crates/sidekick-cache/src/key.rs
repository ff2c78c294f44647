//! Cache key sanitization and encoding variants

/// Directory created under the store root that holds one subdirectory per key
pub const CACHE_DIR: &str = "sidekick-cache";

/// Replaces path separators in caller keys so a key is always one path segment
pub const KEY_SEPARATOR_SUBSTITUTE: char = '+';

/// Compressed representations a key can be cached under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Brotli,
    Gzip,
}

impl Encoding {
    pub const ALL: [Encoding; 2] = [Encoding::Brotli, Encoding::Gzip];

    pub fn tag(self) -> &'static str {
        match self {
            Encoding::Brotli => "br",
            Encoding::Gzip => "gzip",
        }
    }

    /// Key for this encoding of `key`, e.g. `gzip::+index.html`
    pub fn variant_key(self, key: &str) -> String {
        format!("{}::{}", self.tag(), sanitize_key(key))
    }
}

/// Replace every path separator in `key` with [`KEY_SEPARATOR_SUBSTITUTE`]
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' => KEY_SEPARATOR_SUBSTITUTE,
            c => c,
        })
        .collect()
}

/// Both variant keys of `key`, in purge order
pub fn variant_keys(key: &str) -> [String; 2] {
    Encoding::ALL.map(|encoding| encoding.variant_key(key))
}
