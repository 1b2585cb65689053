//! Search result model and backend capability traits
//!
//! Both backends reshape their native responses into the same
//! [`FormattedResult`] list. The traits here are the only surface the
//! agent-facing tools depend on.

mod backend;
mod models;
mod text;
mod tree;

pub use backend::{ContentFetcher, DEFAULT_REV, DEFAULT_TREE_DEPTH, SearchBackend};
pub use models::{FormattedResult, IndexResults, Match, RawResults, StreamResults};
pub use text::{
    DEFAULT_MAX_LINE_LENGTH, MAX_FILE_SIZE, blob_url, normalize_repository, truncate_file_content,
    truncate_line, truncate_lines,
};
pub use tree::{TreeEntry, render_tree};
