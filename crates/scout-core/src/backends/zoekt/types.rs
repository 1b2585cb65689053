//! Wire types of the index search API

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Top-level search response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "Result", default)]
    pub result: Option<SearchResult>,
}

/// Files and repository metadata of one search
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResult {
    /// `null` when nothing matched
    #[serde(rename = "Files", default)]
    pub files: Option<Vec<Value>>,
    #[serde(rename = "RepoURLs", default)]
    pub repo_urls: Option<HashMap<String, String>>,
}

/// One matched file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FileMatch {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    /// Whole file body, base64; only present for whole-file searches
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub line_matches: Option<Vec<LineMatch>>,
    #[serde(default)]
    pub chunk_matches: Option<Vec<ChunkMatch>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LineMatch {
    /// Base64 line text
    #[serde(default)]
    pub line: String,
    /// 1-indexed
    #[serde(default)]
    pub line_number: u32,
    /// Match is on the file name, not the content
    #[serde(default)]
    pub file_name: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ChunkMatch {
    /// Base64 chunk text, context lines included
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_start: Option<Location>,
    #[serde(default)]
    pub file_name: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Location {
    /// 1-indexed
    #[serde(default)]
    pub line_number: u32,
}

/// Decode a base64 text field, replacing invalid UTF-8
pub(crate) fn decode_text(encoded: &str) -> Option<String> {
    match STANDARD.decode(encoded) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!("Skipping undecodable match text: {}", e);
            None
        }
    }
}
