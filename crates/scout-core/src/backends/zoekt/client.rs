//! Index search client

use super::format::format_index_results;
use super::types::{SearchResponse, SearchResult};
use crate::error::{ScoutError, ScoutResult};
use crate::search::{
    DEFAULT_MAX_LINE_LENGTH, FormattedResult, IndexResults, RawResults, SearchBackend,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Context lines requested around each chunk match
const CONTEXT_LINES: u32 = 5;

/// Zoekt web server client
#[derive(Debug, Clone)]
pub struct ZoektClient {
    base_url: String,
    max_line_length: usize,
    http_client: Client,
}

impl ZoektClient {
    /// Create a client for a web server base URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is empty.
    pub fn new(base_url: impl Into<String>) -> ScoutResult<Self> {
        Ok(Self {
            base_url: require_base_url(base_url.into())?,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            http_client: Client::new(),
        })
    }

    /// Set the maximum displayed line length
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchBackend for ZoektClient {
    async fn search(&self, query: &str, limit: usize) -> ScoutResult<RawResults> {
        let body = json!({
            "Q": query,
            "Opts": {
                "ChunkMatches": true,
                "NumContextLines": CONTEXT_LINES,
                "MaxDocDisplayCount": limit,
            }
        });

        let result = post_search(&self.http_client, &self.base_url, &body).await?;
        let files = result.files.unwrap_or_default();

        tracing::debug!(files = files.len(), "Zoekt search completed");

        Ok(RawResults::Index(IndexResults {
            files,
            repo_urls: result.repo_urls.unwrap_or_default(),
        }))
    }

    fn format_results(&self, raw: &RawResults, limit: usize) -> Vec<FormattedResult> {
        match raw {
            RawResults::Index(results) => {
                format_index_results(results, limit, self.max_line_length)
            }
            RawResults::Stream(_) => {
                tracing::warn!("Zoekt client cannot format stream results");
                Vec::new()
            }
        }
    }
}

pub(crate) fn require_base_url(base_url: String) -> ScoutResult<String> {
    if base_url.trim().is_empty() {
        return Err(ScoutError::config_field(
            "Zoekt base URL is required",
            "base_url",
        ));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Run one search request against `{base_url}/api/search`
pub(crate) async fn post_search(
    http_client: &Client,
    base_url: &str,
    body: &Value,
) -> ScoutResult<SearchResult> {
    let url = format!("{}/api/search", base_url);

    let response = http_client.post(&url).json(body).send().await.map_err(|e| {
        tracing::error!("Zoekt search request failed: {}", e);
        ScoutError::transport_with_source(format!("Search failed: {}", e), e)
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("Zoekt search returned HTTP {}", status);
        return Err(ScoutError::transport_status(
            format!("Search failed with HTTP status {}", status),
            url,
            status.as_u16(),
        ));
    }

    let parsed: SearchResponse = response.json().await.map_err(|e| {
        ScoutError::transport_with_source(format!("Invalid search response: {}", e), e)
    })?;

    Ok(parsed.result.unwrap_or_default())
}
