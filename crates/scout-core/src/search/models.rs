//! Uniform search result types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single matched location inside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// 1-indexed line number; 0 when no line applies (repo, path, commit)
    pub line_number: u32,
    /// Display text, already truncated per line
    pub text: String,
}

impl Match {
    /// Create a match at a line
    pub fn new(line_number: u32, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// Create a match with no line number
    pub fn without_line(text: impl Into<String>) -> Self {
        Self::new(0, text)
    }
}

/// Normalized result returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedResult {
    /// File path; empty for repository-level matches
    pub filename: String,
    /// Repository name
    pub repository: String,
    /// Matches in discovery order
    pub matches: Vec<Match>,
    /// Canonical URL; may be empty
    pub url: String,
}

impl FormattedResult {
    /// Create a result with no matches yet
    pub fn new(
        filename: impl Into<String>,
        repository: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            repository: repository.into(),
            matches: Vec::new(),
            url: url.into(),
        }
    }

    /// Attach matches
    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }
}

/// Buckets accumulated from a streaming search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamResults {
    /// Raw match payloads in arrival order
    pub matches: Vec<Value>,
    /// Latest filters payload (last write wins)
    pub filters: Vec<Value>,
    /// Progress payloads in arrival order
    pub progress: Vec<Value>,
    /// Alert payloads in arrival order
    pub alerts: Vec<Value>,
}

/// Response of the index search API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexResults {
    /// Raw file match payloads in ranking order
    pub files: Vec<Value>,
    /// Repository name to URL template
    pub repo_urls: std::collections::HashMap<String, String>,
}

/// Unstructured bag produced by a backend's search call
///
/// Created fresh per search and discarded after formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawResults {
    /// Streaming search API output
    Stream(StreamResults),
    /// Index HTTP API output
    Index(IndexResults),
}

impl RawResults {
    /// Number of raw matches collected
    pub fn len(&self) -> usize {
        match self {
            Self::Stream(results) => results.matches.len(),
            Self::Index(results) => results.files.len(),
        }
    }

    /// Whether nothing was collected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
