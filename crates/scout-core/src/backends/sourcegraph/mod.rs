//! Sourcegraph backend: streaming search plus GraphQL content lookups

mod client;
mod fetcher;
mod format;


pub use client::SourcegraphClient;
pub use fetcher::SourcegraphContentFetcher;
pub use format::format_stream_results;
