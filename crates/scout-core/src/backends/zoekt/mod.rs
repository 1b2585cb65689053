//! Zoekt backend: JSON search API for both search and content lookups
//!
//! The index server never streams; a single `POST /api/search` returns the
//! ranked file matches. Text fields (`Content`, `Line`) arrive base64
//! encoded and are decoded during formatting.

mod client;
mod fetcher;
mod format;
mod types;


pub use client::ZoektClient;
pub use fetcher::ZoektContentFetcher;
pub use format::format_index_results;
