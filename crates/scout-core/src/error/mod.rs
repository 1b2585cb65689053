//! Error types for Scout
//!
//! Every fallible operation in the crate returns [`ScoutError`]. The enum
//! implements the `UnifiedError` trait, which provides consistent fields:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - context: Optional additional context about where/why the error occurred
//!
//! Construction-time problems (`Config`) are always surfaced. Per-record
//! stream problems (`MalformedEvent`) are only ever logged by the backends.

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{NOT_FOUND_MESSAGE, ScoutError, ScoutResult, UnifiedError};
