//! Repository content fetcher backed by the GraphQL API

use crate::backends::{non_empty, token_header};
use crate::error::{ScoutError, ScoutResult};
use crate::search::{
    ContentFetcher, DEFAULT_REV, TreeEntry, normalize_repository, render_tree,
    truncate_file_content,
};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{Value, json};

const FILE_QUERY: &str = r#"
query GetFileContent($name: String!, $path: String!, $rev: String!) {
    repository(name: $name) {
        commit(rev: $rev) {
            file(path: $path) {
                path
                name
                content
                totalLines
                binary
            }
        }
    }
}
"#;

const TREE_QUERY: &str = r#"
query GetRepositoryTree($name: String!, $path: String = ".", $rev: String!) {
    repository(name: $name) {
        name
        commit(rev: $rev) {
            tree(path: $path) {
                entries {
                    name
                    isDirectory
                    ... on GitTree {
                        entries {
                            name
                            isDirectory
                        }
                    }
                }
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileNode {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    total_lines: Option<u64>,
}

/// Sourcegraph GraphQL content fetcher
#[derive(Debug, Clone)]
pub struct SourcegraphContentFetcher {
    endpoint: String,
    token: Option<String>,
    http_client: Client,
}

impl SourcegraphContentFetcher {
    /// Create a fetcher for an instance endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the endpoint is empty.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> ScoutResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ScoutError::config_field(
                "Sourcegraph endpoint is required",
                "endpoint",
            ));
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: non_empty(token),
            http_client: Client::new(),
        })
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    fn graphql_url(&self) -> String {
        format!("{}/.api/graphql", self.endpoint)
    }

    /// Run one GraphQL query and return its JSON body
    ///
    /// Any failure along the way, including a GraphQL `errors` payload,
    /// surfaces as not-found with the cause kept as context.
    async fn graphql(&self, query: &str, variables: Value) -> ScoutResult<Value> {
        let mut request = self
            .http_client
            .post(self.graphql_url())
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token_header(token));
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!("GraphQL request failed: {}", e);
            ScoutError::not_found_with_context(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GraphQL request returned HTTP {}", status);
            return Err(ScoutError::not_found_with_context(format!(
                "HTTP status {}",
                status
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            tracing::debug!("GraphQL response was not valid JSON: {}", e);
            ScoutError::not_found_with_context(format!("invalid response: {}", e))
        })?;

        if body.get("errors").is_some() {
            tracing::debug!("GraphQL response carried errors: {}", body["errors"]);
            return Err(ScoutError::not_found_with_context("GraphQL errors"));
        }

        Ok(body)
    }

    /// File content, or `None` when the path does not resolve to a file
    async fn file_content(&self, repository: &str, path: &str, rev: &str) -> ScoutResult<Option<String>> {
        let body = self
            .graphql(
                FILE_QUERY,
                json!({ "name": repository, "path": path, "rev": rev }),
            )
            .await?;

        let node = match body.pointer("/data/repository/commit/file") {
            Some(node) if !node.is_null() => node,
            _ => return Ok(None),
        };
        let file = FileNode::deserialize(node).map_err(|e| {
            ScoutError::not_found_with_context(format!("unexpected file payload: {}", e))
        })?;

        Ok(file
            .content
            .filter(|c| !c.is_empty())
            .map(|c| truncate_file_content(&c, file.total_lines)))
    }

    /// Directory listing rendered to `depth` levels
    async fn tree(&self, repository: &str, path: &str, depth: usize, rev: &str) -> ScoutResult<String> {
        let body = self
            .graphql(
                TREE_QUERY,
                json!({ "name": repository, "path": path, "rev": rev }),
            )
            .await?;

        if body.pointer("/data/repository").is_none_or(Value::is_null) {
            return Err(ScoutError::not_found_with_context("repository missing"));
        }

        let tree = match body.pointer("/data/repository/commit/tree") {
            Some(tree) if !tree.is_null() => tree,
            _ => return Err(ScoutError::not_found_with_context("tree missing")),
        };

        let entries = match tree.get("entries") {
            Some(entries) if !entries.is_null() => Vec::<TreeEntry>::deserialize(entries)
                .map_err(|e| {
                    ScoutError::not_found_with_context(format!("unexpected tree payload: {}", e))
                })?,
            _ => Vec::new(),
        };

        Ok(render_tree(&entries, depth))
    }
}

#[async_trait]
impl ContentFetcher for SourcegraphContentFetcher {
    async fn get_content(
        &self,
        repository: &str,
        path: &str,
        depth: usize,
        rev: &str,
    ) -> ScoutResult<String> {
        let repository = normalize_repository(repository);
        let rev = if rev.is_empty() { DEFAULT_REV } else { rev };

        if path.is_empty() {
            return self
                .tree(&repository, ".", depth, rev)
                .await
                .map_err(|e| not_found_from(&repository, path, e));
        }

        match self.file_content(&repository, path, rev).await {
            Ok(Some(content)) => return Ok(content),
            Ok(None) => tracing::debug!("{} is not a file in {}, trying as directory", path, repository),
            Err(e) => tracing::debug!("File lookup for {} in {} failed: {}", path, repository, e),
        }

        self.tree(&repository, path, depth, rev)
            .await
            .map_err(|e| not_found_from(&repository, path, e))
    }
}

fn not_found_from(repository: &str, path: &str, cause: ScoutError) -> ScoutError {
    tracing::debug!("No content for {}:{} ({})", repository, path, cause);
    ScoutError::not_found_with_context(format!("{}:{}", repository, path))
}
