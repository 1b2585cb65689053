//! Backend capability traits

use super::models::{FormattedResult, RawResults};
use crate::error::ScoutResult;
use async_trait::async_trait;

/// Tree depth used when a caller does not ask for one
pub const DEFAULT_TREE_DEPTH: usize = 2;

/// Revision used when a caller does not ask for one
pub const DEFAULT_REV: &str = "HEAD";

/// A remote code search service
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute a query and collect the raw response
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::SearchTransport` on connection failure or a
    /// non-success HTTP status.
    async fn search(&self, query: &str, limit: usize) -> ScoutResult<RawResults>;

    /// Reshape at most `limit` raw matches into uniform results
    fn format_results(&self, raw: &RawResults, limit: usize) -> Vec<FormattedResult>;
}

/// Fetches file content or directory listings from a repository
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Get a file's content, or a rendered tree when `path` is a directory
    ///
    /// An empty `path` lists the repository root.
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::NotFound` when neither a file nor a directory
    /// resolves, including when the service could not be reached.
    async fn get_content(
        &self,
        repository: &str,
        path: &str,
        depth: usize,
        rev: &str,
    ) -> ScoutResult<String>;
}
