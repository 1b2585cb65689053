//! Backend construction from a backend tag and an options bag
//!
//! Construction performs no I/O. Required fields are validated up front so
//! a misconfigured backend fails at startup instead of on first use.

use crate::backends::{
    SourcegraphClient, SourcegraphContentFetcher, ZoektClient, ZoektContentFetcher,
};
use crate::error::{ScoutError, ScoutResult};
use crate::search::{
    ContentFetcher, DEFAULT_MAX_LINE_LENGTH, FormattedResult, RawResults, SearchBackend,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default cap on total output size, kept for configuration compatibility
pub const DEFAULT_MAX_OUTPUT_LENGTH: usize = 100_000;

/// Supported search services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sourcegraph,
    Zoekt,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sourcegraph => "sourcegraph",
            Self::Zoekt => "zoekt",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sourcegraph" => Ok(Self::Sourcegraph),
            "zoekt" => Ok(Self::Zoekt),
            other => Err(ScoutError::config_field(
                format!("Unsupported search backend: {}", other),
                "backend",
            )),
        }
    }
}

/// Options consumed by backend constructors
///
/// Each backend reads only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    /// Sourcegraph instance URL
    pub endpoint: Option<String>,
    /// Sourcegraph access token
    pub token: Option<String>,
    /// Zoekt web server URL
    pub base_url: Option<String>,
    pub max_line_length: usize,
    pub max_output_length: usize,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            base_url: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_output_length: DEFAULT_MAX_OUTPUT_LENGTH,
        }
    }
}

impl BackendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    fn require_endpoint(&self) -> ScoutResult<&str> {
        require(self.endpoint.as_deref(), "Sourcegraph backend requires endpoint parameter", "endpoint")
    }

    fn require_base_url(&self) -> ScoutResult<&str> {
        require(self.base_url.as_deref(), "Zoekt backend requires base_url parameter", "base_url")
    }
}

fn require<'a>(value: Option<&'a str>, message: &str, field: &str) -> ScoutResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ScoutError::config_field(message, field))
}

/// A search backend chosen at runtime
#[derive(Debug, Clone)]
pub enum SearchClient {
    Sourcegraph(SourcegraphClient),
    Zoekt(ZoektClient),
}

impl SearchClient {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Sourcegraph(_) => BackendKind::Sourcegraph,
            Self::Zoekt(_) => BackendKind::Zoekt,
        }
    }

    fn backend(&self) -> &dyn SearchBackend {
        match self {
            Self::Sourcegraph(client) => client,
            Self::Zoekt(client) => client,
        }
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str, limit: usize) -> ScoutResult<RawResults> {
        self.backend().search(query, limit).await
    }

    fn format_results(&self, raw: &RawResults, limit: usize) -> Vec<FormattedResult> {
        self.backend().format_results(raw, limit)
    }
}

/// A content fetcher chosen at runtime
#[derive(Debug, Clone)]
pub enum ContentClient {
    Sourcegraph(SourcegraphContentFetcher),
    Zoekt(ZoektContentFetcher),
}

impl ContentClient {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Sourcegraph(_) => BackendKind::Sourcegraph,
            Self::Zoekt(_) => BackendKind::Zoekt,
        }
    }

    fn fetcher(&self) -> &dyn ContentFetcher {
        match self {
            Self::Sourcegraph(fetcher) => fetcher,
            Self::Zoekt(fetcher) => fetcher,
        }
    }
}

#[async_trait]
impl ContentFetcher for ContentClient {
    async fn get_content(
        &self,
        repository: &str,
        path: &str,
        depth: usize,
        rev: &str,
    ) -> ScoutResult<String> {
        self.fetcher().get_content(repository, path, depth, rev).await
    }
}

/// Build a search client
///
/// # Errors
///
/// Returns `ScoutError::Config` naming the missing field.
pub fn create_search_client(kind: BackendKind, options: &BackendOptions) -> ScoutResult<SearchClient> {
    let client = match kind {
        BackendKind::Sourcegraph => SearchClient::Sourcegraph(
            SourcegraphClient::new(options.require_endpoint()?, options.token.clone())?
                .with_max_line_length(options.max_line_length),
        ),
        BackendKind::Zoekt => SearchClient::Zoekt(
            ZoektClient::new(options.require_base_url()?)?
                .with_max_line_length(options.max_line_length),
        ),
    };

    tracing::debug!(backend = %kind, "Created search client");
    Ok(client)
}

/// Build a content fetcher
///
/// # Errors
///
/// Returns `ScoutError::Config` naming the missing field.
pub fn create_content_fetcher(
    kind: BackendKind,
    options: &BackendOptions,
) -> ScoutResult<ContentClient> {
    let fetcher = match kind {
        BackendKind::Sourcegraph => ContentClient::Sourcegraph(SourcegraphContentFetcher::new(
            options.require_endpoint()?,
            options.token.clone(),
        )?),
        BackendKind::Zoekt => {
            ContentClient::Zoekt(ZoektContentFetcher::new(options.require_base_url()?)?)
        }
    };

    tracing::debug!(backend = %kind, "Created content fetcher");
    Ok(fetcher)
}

/// Build a search client from a backend name
///
/// # Errors
///
/// Returns `ScoutError::Config` for an unknown name or a missing field.
pub fn search_client_for(backend: &str, options: &BackendOptions) -> ScoutResult<SearchClient> {
    create_search_client(backend.parse()?, options)
}

/// Build a content fetcher from a backend name
///
/// # Errors
///
/// Returns `ScoutError::Config` for an unknown name or a missing field.
pub fn content_fetcher_for(backend: &str, options: &BackendOptions) -> ScoutResult<ContentClient> {
    create_content_fetcher(backend.parse()?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;

    fn field_of(err: ScoutError) -> Option<String> {
        match err {
            ScoutError::Config { field, .. } => field,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_backend_kind() {
        assert_eq!("sourcegraph".parse::<BackendKind>().unwrap(), BackendKind::Sourcegraph);
        assert_eq!(" Zoekt ".parse::<BackendKind>().unwrap(), BackendKind::Zoekt);

        let err = "github".parse::<BackendKind>().unwrap_err();
        assert!(err.to_string().contains("Unsupported search backend: github"));
    }

    #[test]
    fn test_sourcegraph_requires_endpoint() {
        let err = create_search_client(BackendKind::Sourcegraph, &BackendOptions::new())
            .unwrap_err();
        assert_eq!(field_of(err), Some("endpoint".to_string()));

        let err = create_content_fetcher(
            BackendKind::Sourcegraph,
            &BackendOptions::new().with_base_url("http://zoekt"),
        )
        .unwrap_err();
        assert_eq!(field_of(err), Some("endpoint".to_string()));
    }

    #[test]
    fn test_zoekt_requires_base_url() {
        let options = BackendOptions::new().with_endpoint("https://sourcegraph.com");
        let err = create_search_client(BackendKind::Zoekt, &options).unwrap_err();
        assert_eq!(field_of(err), Some("base_url".to_string()));

        let err = content_fetcher_for("zoekt", &options).unwrap_err();
        assert_eq!(field_of(err), Some("base_url".to_string()));
    }

    #[test]
    fn test_creates_matching_backends() {
        let options = BackendOptions::new()
            .with_endpoint("https://sourcegraph.com")
            .with_base_url("http://localhost:6070");

        let search = search_client_for("sourcegraph", &options).unwrap();
        assert_eq!(search.kind(), BackendKind::Sourcegraph);
        let fetcher = content_fetcher_for("zoekt", &options).unwrap();
        assert_eq!(fetcher.kind(), BackendKind::Zoekt);
    }

    #[test]
    fn test_unknown_backend_fails_before_field_checks() {
        let err = search_client_for("elastic", &BackendOptions::new()).unwrap_err();
        assert!(err.is_config());
        assert_eq!(field_of(err), Some("backend".to_string()));
    }
}
