//! Streaming search client

use super::format::format_stream_results;
use crate::backends::{non_empty, token_header};
use crate::error::{ScoutError, ScoutResult};
use crate::search::{
    DEFAULT_MAX_LINE_LENGTH, FormattedResult, RawResults, SearchBackend, StreamResults,
};
use crate::sse_decoder::{SseEvent, event_stream};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

/// Context lines requested around each chunk match
const CONTEXT_LINES: &str = "5";

/// Longest payload excerpt written to debug logs
const PAYLOAD_PREVIEW_CHARS: usize = 500;

/// Sourcegraph streaming search client
#[derive(Debug, Clone)]
pub struct SourcegraphClient {
    endpoint: String,
    token: Option<String>,
    max_line_length: usize,
    http_client: Client,
}

impl SourcegraphClient {
    /// Create a client for an instance endpoint
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

    /// Instance endpoint without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn stream_url(&self) -> String {
        format!("{}/.api/search/stream", self.endpoint)
    }
}

#[async_trait]
impl SearchBackend for SourcegraphClient {
    async fn search(&self, query: &str, limit: usize) -> ScoutResult<RawResults> {
        let url = self.stream_url();
        let display = limit.to_string();

        let mut request = self
            .http_client
            .get(&url)
            .query(&[
                ("q", query),
                ("t", "keyword"),
                ("v", "V3"),
                ("cm", "true"),
                ("cl", CONTEXT_LINES),
                ("display", display.as_str()),
            ])
            .header(ACCEPT, "text/event-stream");

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token_header(token));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Sourcegraph search request failed: {}", e);
            ScoutError::transport_with_source(format!("Search failed: {}", e), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Sourcegraph search returned HTTP {}", status);
            return Err(ScoutError::transport_status(
                format!("Search failed with HTTP status {}", status),
                url,
                status.as_u16(),
            ));
        }

        // The body stream owns the connection; it is dropped, and the
        // connection released, as soon as accumulation returns.
        let results = accumulate_events(event_stream(response.bytes_stream())).await;

        tracing::debug!(
            matches = results.matches.len(),
            alerts = results.alerts.len(),
            "Sourcegraph search stream consumed"
        );

        Ok(RawResults::Stream(results))
    }

    fn format_results(&self, raw: &RawResults, limit: usize) -> Vec<FormattedResult> {
        match raw {
            RawResults::Stream(results) => {
                format_stream_results(results, limit, self.max_line_length)
            }
            RawResults::Index(_) => {
                tracing::warn!("Sourcegraph client cannot format index results");
                Vec::new()
            }
        }
    }
}

/// Fold a stream of records into result buckets
///
/// Consumption stops at the first `done` record. A record whose payload is
/// not valid JSON is logged and skipped.
pub(crate) async fn accumulate_events<S>(events: S) -> StreamResults
where
    S: Stream<Item = SseEvent>,
{
    let mut events = std::pin::pin!(events);
    let mut results = StreamResults::default();

    while let Some(event) = events.next().await {
        if event.is_done() {
            break;
        }
        if event.data.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(&event.data) {
            Ok(data) => data,
            Err(e) => {
                let err = ScoutError::malformed_event(&event.event_type, e.to_string());
                tracing::warn!("Skipping event: {}", err);
                tracing::debug!(
                    "Problematic data: {}...",
                    event.data.chars().take(PAYLOAD_PREVIEW_CHARS).collect::<String>()
                );
                continue;
            }
        };

        match (event.event_type.as_str(), data) {
            ("matches", Value::Array(items)) => results.matches.extend(items),
            ("filters", Value::Array(items)) => results.filters = items,
            ("progress", data) => results.progress.push(data),
            ("alert", data) => results.alerts.push(data),
            (other, _) => tracing::trace!("Ignoring '{}' event", other),
        }
    }

    results
}
