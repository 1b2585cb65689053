//! Text shaping shared by both backends

/// Longest line shown in a match before it is cut
pub const DEFAULT_MAX_LINE_LENGTH: usize = 300;

/// Largest file body returned by a content fetch, in bytes
pub const MAX_FILE_SIZE: usize = 100_000;

const ELLIPSIS: &str = "...";

/// Cut a line to at most `max_len` characters
///
/// A cut line keeps `max_len - 3` characters followed by `...`, so its
/// length is exactly `max_len`. Lines within the limit are returned as is,
/// which makes the operation idempotent. Limits too small for the ellipsis
/// keep the first `max_len` characters only.
pub fn truncate_line(line: &str, max_len: usize) -> String {
    if line.chars().count() <= max_len {
        return line.to_string();
    }
    if max_len <= ELLIPSIS.len() {
        return line.chars().take(max_len).collect();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = line.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Truncate every line of a multi-line block and join it back together
pub fn truncate_lines(text: &str, max_len: usize) -> String {
    text.split('\n')
        .map(|line| truncate_line(line, max_len))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cap a file body at [`MAX_FILE_SIZE`] bytes
///
/// The body is cut at the byte limit (backed off to a character boundary),
/// then trimmed to the last newline so no partial line is shown, and a
/// notice with the original size and line count is appended.
pub fn truncate_file_content(content: &str, total_lines: Option<u64>) -> String {
    truncate_file_content_at(content, total_lines, MAX_FILE_SIZE)
}

pub(crate) fn truncate_file_content_at(
    content: &str,
    total_lines: Option<u64>,
    max_size: usize,
) -> String {
    if content.len() <= max_size {
        return content.to_string();
    }

    let mut cut = max_size;
    while !content.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut kept = &content[..cut];
    if let Some(last_newline) = kept.rfind('\n') {
        if last_newline > 0 {
            kept = &kept[..last_newline];
        }
    }

    let lines = total_lines
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{}\n\n[FILE TRUNCATED: File too large ({} chars, {} lines). Showing first {} chars]",
        kept,
        with_thousands(content.len()),
        lines,
        with_thousands(kept.len())
    )
}

/// Canonical blob URL for a file
pub fn blob_url(repository: &str, path: &str) -> String {
    format!("https://{}/-/blob/HEAD/{}", repository, path)
}

/// Strip URL scheme prefixes from a repository identifier
pub fn normalize_repository(repository: &str) -> String {
    repository.replace("https://", "").replace("http://", "")
}

fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_line_exact_length() {
        let long = "x".repeat(400);
        let cut = truncate_line(&long, 300);

        assert_eq!(cut.chars().count(), 300);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_line(&cut, 300), cut);
    }

    #[test]
    fn test_truncate_line_within_limit() {
        assert_eq!(truncate_line("short", 300), "short");
        let edge = "y".repeat(300);
        assert_eq!(truncate_line(&edge, 300), edge);
    }

    #[test]
    fn test_truncate_line_counts_characters() {
        let line = "\u{e9}".repeat(10);
        let cut = truncate_line(&line, 8);
        assert_eq!(cut, format!("{}...", "\u{e9}".repeat(5)));
    }

    #[test]
    fn test_truncate_line_tiny_limit() {
        assert_eq!(truncate_line("abcdef", 2), "ab");
        assert_eq!(truncate_line("abcdef", 3), "abc");
        assert_eq!(truncate_line("abcdef", 0), "");
        assert_eq!(truncate_line("abcdef", 4), "a...");
    }

    #[test]
    fn test_truncate_lines_per_line() {
        let text = format!("{}\nok", "z".repeat(20));
        assert_eq!(truncate_lines(&text, 10), "zzzzzzz...\nok");
    }

    #[test]
    fn test_file_under_cap_is_unchanged() {
        let body = "fn main() {}\n";
        assert_eq!(truncate_file_content(body, Some(1)), body);
    }

    #[test]
    fn test_file_over_cap_ends_at_line_boundary() {
        let body = "abcdefghi\n".repeat(5);
        let out = truncate_file_content_at(&body, Some(5), 25);

        let (kept, notice) = out.split_once("\n\n[FILE TRUNCATED").unwrap();
        assert_eq!(kept, "abcdefghi\nabcdefghi");
        assert!(notice.contains("(50 chars, 5 lines)"));
        assert!(notice.contains("Showing first 19 chars]"));
    }

    #[test]
    fn test_file_over_cap_unknown_lines() {
        let body = "a\n".repeat(10);
        let out = truncate_file_content_at(&body, None, 5);
        assert!(out.contains("unknown lines"));
    }

    #[test]
    fn test_file_cut_respects_char_boundary() {
        let body = format!("{}\n{}", "a".repeat(3), "\u{1f980}".repeat(4));
        let out = truncate_file_content_at(&body, Some(2), 6);
        assert!(out.starts_with("aaa\n\n[FILE TRUNCATED"));
    }

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_normalize_repository() {
        assert_eq!(
            normalize_repository("https://github.com/org/repo"),
            "github.com/org/repo"
        );
        assert_eq!(normalize_repository("http://gitlab.com/x"), "gitlab.com/x");
        assert_eq!(normalize_repository("github.com/a/b"), "github.com/a/b");
    }

    #[test]
    fn test_blob_url() {
        assert_eq!(
            blob_url("github.com/a/b", "src/lib.rs"),
            "https://github.com/a/b/-/blob/HEAD/src/lib.rs"
        );
    }
}
