//! Scout Core Library
//!
//! Code search and repository context for tool-calling agents. This crate
//! provides the search backends (Sourcegraph streaming search and Zoekt),
//! repository content fetchers, backend construction from configuration,
//! and the resource governors that bound an agent's tool calls and tokens.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod governor;
pub mod search;
pub mod sse_decoder;
pub mod tools;

// Re-export commonly used types
pub use config::ScoutConfig;
pub use error::{ScoutError, ScoutResult, UnifiedError};
pub use factory::{
    BackendKind, BackendOptions, ContentClient, SearchClient, create_content_fetcher,
    create_search_client,
};
pub use governor::{
    ControlMessage, ExecutionStep, GovernedFn, GovernedResponse, GovernorPhase, SteppedExecution,
    TokenBudgetGovernor, TokenUsage, ToolCallGovernor,
};
pub use search::{ContentFetcher, FormattedResult, Match, RawResults, SearchBackend};
pub use sse_decoder::{SseDecoder, SseEvent};
pub use tools::{CodeSearchTools, ToolCallResult, ToolContent, ToolInvocation};
