//! Core error types and traits for Scout

use thiserror::Error;

/// Result type alias for Scout operations
pub type ScoutResult<T> = Result<T, ScoutError>;

/// Boxed underlying cause carried by transport errors
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message shared by every content lookup failure.
///
/// A missing repository, a missing path, and an unreachable backend all
/// report this same text.
pub const NOT_FOUND_MESSAGE: &str = "invalid arguments the given path or repository does not exist";

/// Unified error trait implemented by Scout errors.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is retryable
    ///
    /// Scout never retries internally; this is a hint for callers.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for Scout
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Missing or invalid backend selection or required field
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Network or HTTP failure while talking to a search service
    #[error("Search transport error: {message}")]
    SearchTransport {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Repository or path could not be resolved as a file or a directory
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        context: Option<String>,
    },

    /// A single stream record whose payload could not be parsed
    #[error("Malformed '{event_type}' event: {message}")]
    MalformedEvent { event_type: String, message: String },

    /// A governed execution failed or ended without a final result
    #[error("Execution error: {message}")]
    Execution {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}
