//! Error types for the chunk cache

use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    /// Key is neither in memory nor on disk
    NotFound(String),
    /// Key is in memory but older than the store TTL
    Expired(String),
    Io(Box<std::io::Error>),
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, CacheError::Expired(_))
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound(key) => write!(f, "Key not found in cache: {}", key),
            CacheError::Expired(key) => write!(f, "Cache expired: {}", key),
            CacheError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
