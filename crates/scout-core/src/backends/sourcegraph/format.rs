//! Reshaping streaming search matches into uniform results

use crate::search::{FormattedResult, Match, StreamResults, blob_url, truncate_line, truncate_lines};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One raw match payload, tagged by its `type` field
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamMatch {
    Content(ContentMatch),
    Symbol(SymbolMatch),
    Repo(RepoMatch),
    Path(LocatedMatch),
    Commit(LocatedMatch),
    Diff(LocatedMatch),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentMatch {
    #[serde(default)]
    repository: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    chunk_matches: Option<Vec<ChunkMatch>>,
    #[serde(default)]
    line_matches: Option<Vec<LineMatch>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChunkMatch {
    #[serde(default)]
    content: String,
    #[serde(default)]
    content_start: Option<Position>,
}

#[derive(Debug, Default, Deserialize)]
struct Position {
    /// 0-indexed line
    #[serde(default)]
    line: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineMatch {
    #[serde(default)]
    line: String,
    /// 0-indexed line
    #[serde(default)]
    line_number: u32,
}

#[derive(Debug, Deserialize)]
struct SymbolMatch {
    #[serde(default)]
    repository: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    symbols: Option<Vec<Symbol>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Symbol {
    #[serde(default)]
    name: String,
    #[serde(default)]
    container_name: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    line: u32,
}

#[derive(Debug, Deserialize)]
struct RepoMatch {
    #[serde(default)]
    repository: String,
}

#[derive(Debug, Deserialize)]
struct LocatedMatch {
    #[serde(default)]
    repository: String,
    #[serde(default)]
    path: String,
    #[serde(default, alias = "oid")]
    commit: String,
}

#[derive(Debug, Default, Deserialize)]
struct Alert {
    #[serde(default)]
    severity: String,
    #[serde(default)]
    message: String,
}

/// Group and normalize at most `limit` raw matches
///
/// Content matches sharing a (repository, path) pair merge into one result
/// in first-seen order. Every other match type yields its own result and
/// follows the content groups in arrival order.
pub fn format_stream_results(
    results: &StreamResults,
    limit: usize,
    max_line_length: usize,
) -> Vec<FormattedResult> {
    log_alerts(&results.alerts);

    let mut groups: Vec<(String, String, Vec<ContentMatch>)> = Vec::new();
    let mut group_index: HashMap<(String, String), usize> = HashMap::new();
    let mut others: Vec<StreamMatch> = Vec::new();

    for raw in results.matches.iter().take(limit) {
        let parsed = match StreamMatch::deserialize(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Skipping unparseable search match: {}", e);
                continue;
            }
        };

        match parsed {
            StreamMatch::Content(content) => {
                let key = (content.repository.clone(), content.path.clone());
                let index = *group_index.entry(key).or_insert_with(|| {
                    groups.push((content.repository.clone(), content.path.clone(), Vec::new()));
                    groups.len() - 1
                });
                groups[index].2.push(content);
            }
            StreamMatch::Unknown => tracing::debug!("Ignoring match of unknown type"),
            other => others.push(other),
        }
    }

    let mut formatted = Vec::new();

    for (repository, path, members) in groups {
        let matches: Vec<Match> = members
            .iter()
            .flat_map(|m| content_matches(m, max_line_length))
            .collect();

        if !matches.is_empty() {
            let url = blob_url(&repository, &path);
            formatted.push(FormattedResult::new(path, repository, url).with_matches(matches));
        }
    }

    formatted.extend(others.into_iter().filter_map(format_single));
    formatted
}

/// Chunk matches when present, otherwise line matches
fn content_matches(content: &ContentMatch, max_line_length: usize) -> Vec<Match> {
    let chunks = content.chunk_matches.as_deref().unwrap_or_default();
    if !chunks.is_empty() {
        return chunks
            .iter()
            .map(|chunk| {
                let start = chunk.content_start.as_ref().map(|p| p.line).unwrap_or(0);
                Match::new(start + 1, truncate_lines(&chunk.content, max_line_length))
            })
            .collect();
    }

    content
        .line_matches
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|line| Match::new(line.line_number + 1, truncate_line(&line.line, max_line_length)))
        .collect()
}

fn format_single(item: StreamMatch) -> Option<FormattedResult> {
    match item {
        StreamMatch::Symbol(symbol) => {
            let matches: Vec<Match> = symbol
                .symbols
                .unwrap_or_default()
                .iter()
                .map(|s| Match::new(s.line, symbol_text(s)))
                .collect();
            if matches.is_empty() {
                return None;
            }
            let url = if symbol.path.is_empty() {
                String::new()
            } else {
                blob_url(&symbol.repository, &symbol.path)
            };
            Some(FormattedResult::new(symbol.path, symbol.repository, url).with_matches(matches))
        }
        StreamMatch::Repo(repo) => {
            let url = format!("https://{}", repo.repository);
            let text = format!("Repository: {}", repo.repository);
            Some(
                FormattedResult::new("", repo.repository, url)
                    .with_matches(vec![Match::without_line(text)]),
            )
        }
        StreamMatch::Path(m) => {
            let text = format!("Path: {}", m.path);
            Some(located_result(m, text))
        }
        StreamMatch::Commit(m) => {
            let mut text = format!("Commit: {}", m.commit);
            if !m.path.is_empty() {
                text.push_str(&format!(" in {}", m.path));
            }
            Some(located_result(m, text))
        }
        StreamMatch::Diff(m) => {
            let text = if m.path.is_empty() {
                "Diff".to_string()
            } else {
                format!("Diff in {}", m.path)
            };
            Some(located_result(m, text))
        }
        StreamMatch::Content(_) | StreamMatch::Unknown => None,
    }
}

fn located_result(m: LocatedMatch, text: String) -> FormattedResult {
    let url = if m.path.is_empty() {
        format!("https://{}", m.repository)
    } else {
        blob_url(&m.repository, &m.path)
    };
    FormattedResult::new(m.path, m.repository, url).with_matches(vec![Match::without_line(text)])
}

fn symbol_text(symbol: &Symbol) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(container) = symbol.container_name.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("Container: {}", container));
    }
    if !symbol.name.is_empty() {
        parts.push(format!("Symbol: {}", symbol.name));
    }
    if let Some(kind) = symbol.kind.as_deref().filter(|k| !k.is_empty()) {
        parts.push(format!("Kind: {}", kind));
    }

    if parts.is_empty() {
        symbol.name.clone()
    } else {
        parts.join(" | ")
    }
}

fn log_alerts(alerts: &[Value]) {
    for raw in alerts {
        let alert = Alert::deserialize(raw).unwrap_or_default();
        match alert.severity.as_str() {
            "error" => tracing::error!("Search alert: {}", alert.message),
            "warning" => tracing::warn!("Search alert: {}", alert.message),
            _ => tracing::info!("Search alert: {}", alert.message),
        }
    }
}
