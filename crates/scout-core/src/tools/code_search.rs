//! Search and fetch tools over a configured backend

use super::types::{ToolCallResult, ToolInvocation};
use crate::config::ScoutConfig;
use crate::config::model::DEFAULT_NUM_RESULTS;
use crate::error::{NOT_FOUND_MESSAGE, ScoutResult};
use crate::factory::{ContentClient, SearchClient, create_content_fetcher, create_search_client};
use crate::search::{ContentFetcher, DEFAULT_REV, DEFAULT_TREE_DEPTH, FormattedResult, SearchBackend};

pub const SEARCH_TOOL: &str = "search";
pub const FETCH_CONTENT_TOOL: &str = "fetch_content";

/// Text returned by `fetch_content` for failures other than not-found
pub const FETCH_ERROR_MESSAGE: &str = "error fetching content";

/// The code search tool pair
#[derive(Debug, Clone)]
pub struct CodeSearchTools {
    search: SearchClient,
    fetcher: ContentClient,
    num_results: usize,
}

impl CodeSearchTools {
    pub fn new(search: SearchClient, fetcher: ContentClient) -> Self {
        Self {
            search,
            fetcher,
            num_results: DEFAULT_NUM_RESULTS,
        }
    }

    /// Build both backends from configuration
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Config` when the configuration is invalid.
    pub fn from_config(config: &ScoutConfig) -> ScoutResult<Self> {
        config.validate()?;
        let options = config.backend_options();
        let tools = Self::new(
            create_search_client(config.backend, &options)?,
            create_content_fetcher(config.backend, &options)?,
        )
        .with_num_results(config.output.num_results);

        tracing::info!(backend = %config.backend, "Code search tools ready");
        Ok(tools)
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn num_results(&self) -> usize {
        self.num_results
    }

    /// Run a query; failures are logged and yield no results
    pub async fn search(&self, query: &str) -> Vec<FormattedResult> {
        match self.search.search(query, self.num_results).await {
            Ok(raw) => self.search.format_results(&raw, self.num_results),
            Err(e) => {
                tracing::error!("Search failed for query '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Fetch a file or directory listing at the default revision
    ///
    /// Failures are reported as text the agent can read.
    pub async fn fetch_content(&self, repository: &str, path: &str) -> String {
        match self
            .fetcher
            .get_content(repository, path, DEFAULT_TREE_DEPTH, DEFAULT_REV)
            .await
        {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                tracing::warn!("Error fetching content from {}: {}", repository, e);
                NOT_FOUND_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!("Unexpected error fetching content: {}", e);
                FETCH_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Dispatch a tool call by name
    pub async fn invoke(&self, call: ToolInvocation) -> ToolCallResult {
        tracing::debug!(tool = %call.tool_name, "Invoking tool");

        match call.tool_name.as_str() {
            SEARCH_TOOL => {
                let Some(query) = call.str_arg("query") else {
                    return ToolCallResult::error("missing required argument: query");
                };
                let results = self.search(query).await;
                match serde_json::to_string_pretty(&results) {
                    Ok(text) => ToolCallResult::text(text),
                    Err(e) => ToolCallResult::error(format!("failed to encode results: {}", e)),
                }
            }
            FETCH_CONTENT_TOOL => {
                let Some(repo) = call.str_arg("repo") else {
                    return ToolCallResult::error("missing required argument: repo");
                };
                let path = call.str_arg("path").unwrap_or_default();
                ToolCallResult::text(self.fetch_content(repo, path).await)
            }
            other => {
                tracing::warn!("Unknown tool requested: {}", other);
                ToolCallResult::error(format!("unknown tool: {}", other))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{BackendKind, BackendOptions};

    fn unreachable_tools() -> CodeSearchTools {
        let options = BackendOptions::new().with_endpoint("http://127.0.0.1:1");
        CodeSearchTools::new(
            create_search_client(BackendKind::Sourcegraph, &options).unwrap(),
            create_content_fetcher(BackendKind::Sourcegraph, &options).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error() {
        let result = unreachable_tools().invoke(ToolInvocation::new("rm")).await;
        assert!(result.is_error);
        assert_eq!(result.joined_text(), "unknown tool: rm");
    }

    #[tokio::test]
    async fn test_missing_argument_is_error() {
        let tools = unreachable_tools();
        assert!(tools.invoke(ToolInvocation::new(SEARCH_TOOL)).await.is_error);
        assert!(tools.invoke(ToolInvocation::new(FETCH_CONTENT_TOOL)).await.is_error);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_text() {
        let tools = unreachable_tools();

        let search = tools
            .invoke(ToolInvocation::new(SEARCH_TOOL).with_argument("query", "foo"))
            .await;
        assert!(!search.is_error);
        assert_eq!(search.joined_text(), "[]");

        let fetched = tools.fetch_content("github.com/a/b", "src/lib.rs").await;
        assert_eq!(fetched, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_from_config_validates() {
        assert!(CodeSearchTools::from_config(&ScoutConfig::default()).is_err());

        let mut config = ScoutConfig::default();
        config.sourcegraph.endpoint = Some("https://sourcegraph.com".to_string());
        config.output.num_results = 5;
        let tools = CodeSearchTools::from_config(&config).unwrap();
        assert_eq!(tools.num_results(), 5);
    }
}
