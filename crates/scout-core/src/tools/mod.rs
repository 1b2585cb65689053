//! Agent-facing tool surface
//!
//! [`CodeSearchTools`] exposes `search` and `fetch_content` over whichever
//! backend was configured. [`CodeSearchTools::invoke`] is the single entry
//! point an agent loop calls, and the one a
//! [`ToolCallGovernor`](crate::governor::ToolCallGovernor) wraps.

mod code_search;
mod types;

pub use code_search::{CodeSearchTools, FETCH_CONTENT_TOOL, FETCH_ERROR_MESSAGE, SEARCH_TOOL};
pub use types::{ToolCallResult, ToolContent, ToolInvocation};
