//! Reshaping index file matches into uniform results

use super::types::{ChunkMatch, FileMatch, LineMatch, decode_text};
use crate::search::{FormattedResult, IndexResults, Match, truncate_line, truncate_lines};
use serde::Deserialize;
use std::collections::HashMap;

/// Group and normalize at most `limit` file matches
///
/// Files sharing a (repository, file name) pair merge into one result in
/// first-seen order. Results without any decodable match are dropped.
pub fn format_index_results(
    results: &IndexResults,
    limit: usize,
    max_line_length: usize,
) -> Vec<FormattedResult> {
    let mut formatted: Vec<FormattedResult> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for raw in results.files.iter().take(limit) {
        let file = match FileMatch::deserialize(raw) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Skipping unparseable file match: {}", e);
                continue;
            }
        };

        let matches = file_matches(&file, max_line_length);
        let key = (file.repository.clone(), file.file_name.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            let url = render_url(results.repo_urls.get(&file.repository), &file);
            formatted.push(FormattedResult::new(
                file.file_name.clone(),
                file.repository.clone(),
                url,
            ));
            formatted.len() - 1
        });
        formatted[slot].matches.extend(matches);
    }

    formatted.retain(|r| !r.matches.is_empty());
    formatted
}

/// Chunk matches when present, otherwise line matches
fn file_matches(file: &FileMatch, max_line_length: usize) -> Vec<Match> {
    let chunks = file.chunk_matches.as_deref().unwrap_or_default();
    if !chunks.is_empty() {
        return chunks
            .iter()
            .filter_map(|chunk| chunk_match(chunk, &file.file_name, max_line_length))
            .collect();
    }

    file.line_matches
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|line| line_match(line, &file.file_name, max_line_length))
        .collect()
}

fn chunk_match(chunk: &ChunkMatch, file_name: &str, max_line_length: usize) -> Option<Match> {
    if chunk.file_name {
        return Some(Match::without_line(format!("Path: {}", file_name)));
    }

    let text = decode_text(&chunk.content)?;
    let line_number = chunk.content_start.as_ref().map(|l| l.line_number).unwrap_or(0);
    Some(Match::new(
        line_number,
        truncate_lines(strip_newline(&text), max_line_length),
    ))
}

fn line_match(line: &LineMatch, file_name: &str, max_line_length: usize) -> Option<Match> {
    if line.file_name {
        return Some(Match::without_line(format!("Path: {}", file_name)));
    }

    let text = decode_text(&line.line)?;
    Some(Match::new(
        line.line_number,
        truncate_line(strip_newline(&text), max_line_length),
    ))
}

fn strip_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

/// Expand a repository URL template for one file
fn render_url(template: Option<&String>, file: &FileMatch) -> String {
    let Some(template) = template.filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let version = file
        .branches
        .as_ref()
        .and_then(|b| b.first())
        .map(String::as_str)
        .unwrap_or("HEAD");

    template
        .replace("{{.Version}}", version)
        .replace("{{.Path}}", &file.file_name)
}
