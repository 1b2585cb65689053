//! Constructor methods for ScoutError

use super::types::{BoxedCause, NOT_FOUND_MESSAGE, ScoutError};

impl ScoutError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create a configuration error naming the offending field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
            context: Some(context.into()),
        }
    }

    /// Create a transport error without an underlying cause
    pub fn transport(message: impl Into<String>) -> Self {
        Self::SearchTransport {
            message: message.into(),
            url: None,
            status_code: None,
            source: None,
        }
    }

    /// Create a transport error wrapping the underlying cause
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::SearchTransport {
            message: message.into(),
            url: None,
            status_code: None,
            source: Some(source.into()),
        }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn transport_status(
        message: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::SearchTransport {
            message: message.into(),
            url: Some(url.into()),
            status_code: Some(status_code),
            source: None,
        }
    }

    /// Create the canonical not-found error
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
            context: None,
        }
    }

    /// Create the canonical not-found error, recording what was attempted
    ///
    /// The context is for logs only; the message stays identical so callers
    /// cannot tell a missing repository from a missing path.
    pub fn not_found_with_context(context: impl Into<String>) -> Self {
        Self::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
            context: Some(context.into()),
        }
    }

    /// Create a malformed event error
    pub fn malformed_event(event_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedEvent {
            event_type: event_type.into(),
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            context: None,
        }
    }

    /// Create an execution error with context
    pub fn execution_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Whether this is the not-found kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Whether this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::SearchTransport { .. })
    }
}
