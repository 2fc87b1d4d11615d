use std::time::Duration;

/// Result type alias for statdx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type shared by fetch collaborators and the caching layer
///
/// Collaborators report `Transport`, `Decode`, `NotFound` and `Timeout`;
/// the cache never rewrites these, it hands them back to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A precondition was violated by the caller
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Text could not be parsed into a domain value
    #[error("failed to parse {kind} '{input}': {message}")]
    Parse {
        kind: &'static str,
        input: String,
        message: String,
    },

    /// The requested resource does not exist at the source
    #[error("{kind} '{reference}' not found")]
    NotFound { kind: &'static str, reference: String },

    /// The collaborator could not reach its source
    #[error("transport error for '{endpoint}': {message}")]
    Transport {
        endpoint: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The collaborator reached its source but could not decode the payload
    #[error("failed to decode {what}: {message}")]
    Decode {
        what: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out
    #[error("operation '{operation}' timed out after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Whether this error was raised by a fetch collaborator rather than by
    /// statdx itself
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::Transport { .. }
                | Error::Decode { .. }
                | Error::Timeout { .. }
        )
    }
}
