//! Error types for the caching layer
//!
//! Persistence failures are recovered inside the cache and only reach the
//! event listener. Configuration failures surface when a cache is opened.

use std::fmt;
use std::path::PathBuf;

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O errors while touching persisted entries
    #[error("I/O error during {operation} on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Codec failures
    #[error("failed to {operation} cache entry with codec '{codec}': {source}")]
    Serialization {
        codec: String,
        operation: SerializationOp,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// gzip failures
    #[error("failed to {operation} cache entry: {source}")]
    Compression {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A persisted entry could not be decoded
    #[error("cache corruption detected in '{}': {reason}", .path.display())]
    Corruption { path: PathBuf, reason: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A pinned provider id is not registered
    #[error("unknown {kind} '{id}', available: [{}]", .available.join(", "))]
    UnknownProvider {
        kind: &'static str,
        id: String,
        available: Vec<String>,
    },

    /// No registered provider reports itself available
    #[error("no {kind} available")]
    NoProviderAvailable { kind: &'static str },
}

/// Serialization operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationOp {
    Encode,
    Decode,
}

impl fmt::Display for SerializationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationOp::Encode => f.write_str("encode"),
            SerializationOp::Decode => f.write_str("decode"),
        }
    }
}

impl CacheError {
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        CacheError::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error comes from configuration rather than from storage
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CacheError::Configuration { .. }
                | CacheError::UnknownProvider { .. }
                | CacheError::NoProviderAvailable { .. }
        )
    }
}

impl From<statdx_core::Error> for CacheError {
    fn from(error: statdx_core::Error) -> Self {
        CacheError::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<CacheError> for statdx_core::Error {
    fn from(error: CacheError) -> Self {
        statdx_core::Error::configuration(error.to_string())
    }
}
