//! UnifiedError trait implementation for ScoutError

use super::types::{ScoutError, UnifiedError};

impl UnifiedError for ScoutError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "SCOUT_CONFIG",
            Self::SearchTransport { .. } => "SCOUT_SEARCH_TRANSPORT",
            Self::NotFound { .. } => "SCOUT_NOT_FOUND",
            Self::MalformedEvent { .. } => "SCOUT_MALFORMED_EVENT",
            Self::Execution { .. } => "SCOUT_EXECUTION",
            Self::InvalidInput { .. } => "SCOUT_INVALID_INPUT",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::SearchTransport { message, .. } => message,
            Self::NotFound { message, .. } => message,
            Self::MalformedEvent { message, .. } => message,
            Self::Execution { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::NotFound { context, .. } => context.as_deref(),
            Self::Execution { context, .. } => context.as_deref(),
            Self::SearchTransport { .. } | Self::MalformedEvent { .. } => None,
            Self::InvalidInput { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::SearchTransport { status_code, .. } => match status_code {
                Some(code) => *code >= 500 || *code == 429,
                None => true,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NOT_FOUND_MESSAGE;

    #[test]
    fn test_error_codes() {
        assert_eq!(ScoutError::config("x").error_code(), "SCOUT_CONFIG");
        assert_eq!(ScoutError::not_found().error_code(), "SCOUT_NOT_FOUND");
        assert_eq!(
            ScoutError::transport("boom").error_code(),
            "SCOUT_SEARCH_TRANSPORT"
        );
    }

    #[test]
    fn test_not_found_message_is_canonical() {
        let missing_repo = ScoutError::not_found_with_context("repo=a");
        let missing_path = ScoutError::not_found_with_context("repo=b path=c");

        assert_eq!(missing_repo.message(), NOT_FOUND_MESSAGE);
        assert_eq!(missing_repo.to_string(), missing_path.to_string());
        assert_eq!(missing_repo.context(), Some("repo=a"));
    }

    #[test]
    fn test_transport_retryable() {
        assert!(ScoutError::transport("connection reset").is_retryable());
        assert!(ScoutError::transport_status("bad gateway", "http://x", 502).is_retryable());
        assert!(!ScoutError::transport_status("unauthorized", "http://x", 401).is_retryable());
        assert!(!ScoutError::config("missing").is_retryable());
    }

    #[test]
    fn test_transport_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ScoutError::transport_with_source("search failed", io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("search failed"));
    }
}
