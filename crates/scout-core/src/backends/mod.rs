//! Concrete search backends
//!
//! | Backend | Search API | Content API |
//! |---------|------------|-------------|
//! | [`sourcegraph`] | Streaming search (SSE) | GraphQL |
//! | [`zoekt`] | JSON search over HTTP | JSON search with whole-file content |

pub mod sourcegraph;
pub mod zoekt;

pub use sourcegraph::{SourcegraphClient, SourcegraphContentFetcher};
pub use zoekt::{ZoektClient, ZoektContentFetcher};

/// Authorization header value for a configured access token
pub(crate) fn token_header(token: &str) -> String {
    format!("token {}", token)
}

/// Treat an empty token as no token
pub(crate) fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}
