//! Error types for the cache admin CLI

use std::fmt;

#[derive(Debug)]
pub enum AdminError {
    Cache(sidekick_cache::CacheError),
    Io(Box<std::io::Error>),
    Json(serde_json::Error),
    Config(String),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Cache(err) => write!(f, "Cache error: {}", err),
            AdminError::Io(err) => write!(f, "IO error: {}", err),
            AdminError::Json(err) => write!(f, "JSON error: {}", err),
            AdminError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdminError::Cache(err) => Some(err),
            AdminError::Io(err) => Some(err.as_ref()),
            AdminError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sidekick_cache::CacheError> for AdminError {
    fn from(err: sidekick_cache::CacheError) -> Self {
        AdminError::Cache(err)
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Json(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for AdminError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        AdminError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
