//! Directory tree rendering

use serde::{Deserialize, Serialize};

/// One entry of a directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEntry {
    /// Entry name (not the full path)
    #[serde(default)]
    pub name: String,
    /// Whether the entry is a directory
    #[serde(default)]
    pub is_directory: bool,
    /// Nested entries, when the listing embedded them
    #[serde(default)]
    pub entries: Option<Vec<TreeEntry>>,
}

impl TreeEntry {
    /// Create a file entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            entries: None,
        }
    }

    /// Create a directory entry with nested entries
    pub fn dir(name: impl Into<String>, entries: Vec<TreeEntry>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            entries: Some(entries),
        }
    }
}

/// Render entries as an indented listing
///
/// Entries are sorted by name at every level, directories get a trailing
/// `/`, and nesting stops once `max_depth` levels have been printed.
/// Nested data that was never fetched is simply not shown.
pub fn render_tree(entries: &[TreeEntry], max_depth: usize) -> String {
    render_level(entries, max_depth, 0)
}

fn render_level(entries: &[TreeEntry], max_depth: usize, current_depth: usize) -> String {
    if current_depth >= max_depth {
        return String::new();
    }

    let mut sorted: Vec<&TreeEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let indent = "  ".repeat(current_depth);
    let mut lines = Vec::with_capacity(sorted.len());

    for entry in sorted {
        if entry.is_directory {
            lines.push(format!("{}{}/", indent, entry.name));
        } else {
            lines.push(format!("{}{}", indent, entry.name));
        }

        if !entry.is_directory || current_depth + 1 >= max_depth {
            continue;
        }
        if let Some(children) = entry.entries.as_deref().filter(|c| !c.is_empty()) {
            let nested = render_level(children, max_depth, current_depth + 1);
            if !nested.is_empty() {
                lines.push(nested);
            }
        }
    }

    lines.join("\n")
}
