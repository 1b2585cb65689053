//! Repository content fetcher backed by whole-file index searches

use super::client::{post_search, require_base_url};
use super::types::{FileMatch, decode_text};
use crate::error::{ScoutError, ScoutResult};
use crate::search::{
    ContentFetcher, DEFAULT_REV, TreeEntry, normalize_repository, render_tree,
    truncate_file_content,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Most files collected for one directory listing
const TREE_FILE_LIMIT: usize = 10_000;

/// Zoekt content fetcher
#[derive(Debug, Clone)]
pub struct ZoektContentFetcher {
    base_url: String,
    http_client: Client,
}

impl ZoektContentFetcher {
    /// Create a fetcher for a web server base URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is empty.
    pub fn new(base_url: impl Into<String>) -> ScoutResult<Self> {
        Ok(Self {
            base_url: require_base_url(base_url.into())?,
            http_client: Client::new(),
        })
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    async fn file_content(&self, repository: &str, path: &str, rev: &str) -> ScoutResult<Option<String>> {
        let query = scoped_query(
            repository,
            &format!("f:^{}$", regex::escape(path)),
            rev,
        );
        let body = json!({
            "Q": query,
            "Opts": { "Whole": true, "MaxDocDisplayCount": 1 }
        });

        let result = post_search(&self.http_client, &self.base_url, &body).await?;
        let files = result.files.unwrap_or_default();

        let Some(first) = files.first() else {
            return Ok(None);
        };
        let file = FileMatch::deserialize(first).map_err(|e| {
            ScoutError::not_found_with_context(format!("unexpected file payload: {}", e))
        })?;
        if file.file_name != path {
            return Ok(None);
        }

        let content = file
            .content
            .as_deref()
            .and_then(decode_text)
            .filter(|c| !c.is_empty());

        Ok(content.map(|c| {
            let total_lines = c.lines().count() as u64;
            truncate_file_content(&c, Some(total_lines))
        }))
    }

    async fn tree(&self, repository: &str, path: &str, depth: usize, rev: &str) -> ScoutResult<String> {
        let prefix = if path.is_empty() || path == "." {
            String::new()
        } else {
            format!("{}/", path.trim_end_matches('/'))
        };
        let filter = if prefix.is_empty() {
            "f:.".to_string()
        } else {
            format!("f:^{}", regex::escape(&prefix))
        };
        let body = json!({
            "Q": scoped_query(repository, &filter, rev),
            "Opts": { "MaxDocDisplayCount": TREE_FILE_LIMIT }
        });

        let result = post_search(&self.http_client, &self.base_url, &body).await?;
        let paths: Vec<String> = result
            .files
            .unwrap_or_default()
            .iter()
            .filter_map(|raw| FileMatch::deserialize(raw).ok())
            .filter_map(|file| file.file_name.strip_prefix(&prefix).map(str::to_string))
            .filter(|relative| !relative.is_empty())
            .collect();

        if paths.is_empty() {
            return Err(ScoutError::not_found_with_context("no files under path"));
        }

        Ok(render_tree(&build_tree(&paths), depth))
    }
}

#[async_trait]
impl ContentFetcher for ZoektContentFetcher {
    async fn get_content(
        &self,
        repository: &str,
        path: &str,
        depth: usize,
        rev: &str,
    ) -> ScoutResult<String> {
        let repository = normalize_repository(repository);
        let rev = if rev.is_empty() { DEFAULT_REV } else { rev };
        let path = path.trim_start_matches('/');

        if !path.is_empty() {
            match self.file_content(&repository, path, rev).await {
                Ok(Some(content)) => return Ok(content),
                Ok(None) => tracing::debug!("{} is not a file in {}, trying as directory", path, repository),
                Err(e) => tracing::debug!("File lookup for {} in {} failed: {}", path, repository, e),
            }
        }

        self.tree(&repository, path, depth, rev).await.map_err(|e| {
            tracing::debug!("No content for {}:{} ({})", repository, path, e);
            ScoutError::not_found_with_context(format!("{}:{}", repository, path))
        })
    }
}

/// Restrict a filter to one repository and, unless `HEAD`, one branch
fn scoped_query(repository: &str, filter: &str, rev: &str) -> String {
    let mut query = format!("r:^{}$ {}", regex::escape(repository), filter);
    if rev != DEFAULT_REV {
        query.push_str(&format!(" branch:{}", rev));
    }
    query
}

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
    is_directory: bool,
}

/// Fold slash-separated relative paths into nested entries
fn build_tree(paths: &[String]) -> Vec<TreeEntry> {
    let mut root = Node::default();

    for path in paths {
        let mut node = &mut root;
        let mut parts = path.split('/').filter(|p| !p.is_empty()).peekable();
        while let Some(part) = parts.next() {
            let child = node.children.entry(part.to_string()).or_default();
            if parts.peek().is_some() {
                child.is_directory = true;
            }
            node = child;
        }
    }

    into_entries(root)
}

fn into_entries(node: Node) -> Vec<TreeEntry> {
    node.children
        .into_iter()
        .map(|(name, child)| {
            if child.is_directory {
                TreeEntry::dir(name, into_entries(child))
            } else {
                TreeEntry::file(name)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree_nests_directories() {
        let paths = vec![
            "src/main.rs".to_string(),
            "src/api/routes.rs".to_string(),
            "README.md".to_string(),
        ];

        let rendered = render_tree(&build_tree(&paths), 3);
        assert_eq!(rendered, "README.md\nsrc/\n  api/\n    routes.rs\n  main.rs");
    }

    #[test]
    fn test_scoped_query_adds_branch() {
        assert_eq!(
            scoped_query("github.com/a/b", "f:^x$", "HEAD"),
            r"r:^github\.com/a/b$ f:^x$"
        );
        assert_eq!(
            scoped_query("github.com/a/b", "f:.", "release"),
            r"r:^github\.com/a/b$ f:. branch:release"
        );
    }
}
