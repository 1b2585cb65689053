//! Tool call counting and cut-off

use super::notices::{last_call_warning, limit_reached_notice};
use crate::error::{ScoutError, ScoutResult};
use crate::tools::{ToolCallResult, ToolContent};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;

/// Default tool calls allowed per run
pub const DEFAULT_MAX_TOOL_CALLS: usize = 50;

/// A governed tool entry point
pub type GovernedFn<A, R> = Arc<dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync>;

/// A tool response the governor can synthesize and annotate
pub trait GovernedResponse: Sized {
    /// Response returned in place of a call that is not forwarded
    fn limit_reached(notice: &str) -> Self;

    /// Append a text notice; returns false when the shape has no room for it
    fn append_notice(&mut self, notice: &str) -> bool;
}

impl GovernedResponse for ToolCallResult {
    fn limit_reached(notice: &str) -> Self {
        ToolCallResult::text(notice)
    }

    fn append_notice(&mut self, notice: &str) -> bool {
        self.content.push(ToolContent::text(notice));
        true
    }
}

impl GovernedResponse for Value {
    fn limit_reached(notice: &str) -> Self {
        json!({
            "content": [{ "type": "text", "text": notice }],
            "isError": false,
        })
    }

    fn append_notice(&mut self, notice: &str) -> bool {
        match self.get_mut("content").and_then(Value::as_array_mut) {
            Some(content) => {
                content.push(json!({ "type": "text", "text": notice }));
                true
            }
            None => false,
        }
    }
}

impl<T: GovernedResponse, E> GovernedResponse for Result<T, E> {
    fn limit_reached(notice: &str) -> Self {
        Ok(T::limit_reached(notice))
    }

    fn append_notice(&mut self, notice: &str) -> bool {
        match self {
            Ok(response) => response.append_notice(notice),
            Err(_) => false,
        }
    }
}

/// Where a governor stands after the calls counted so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorPhase {
    /// Calls pass through unchanged
    Open,
    /// The last allowed call was made
    LastCall,
    /// Calls are answered with the limit notice
    Closed,
}

#[derive(Debug, Default)]
struct CallState {
    call_count: usize,
    limit_reached: bool,
}

/// Counts tool calls and stops forwarding them past a limit
///
/// Clones share state, so the handle kept by the caller observes the calls
/// made through any wrapped function.
#[derive(Debug, Clone)]
pub struct ToolCallGovernor {
    max_calls: usize,
    state: Arc<Mutex<CallState>>,
}

impl ToolCallGovernor {
    /// Create a governor allowing `max_calls` forwarded calls
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `max_calls` is zero.
    pub fn new(max_calls: usize) -> ScoutResult<Self> {
        if max_calls == 0 {
            return Err(ScoutError::config_field(
                "max_calls must be a positive integer",
                "max_calls",
            ));
        }

        Ok(Self {
            max_calls,
            state: Arc::new(Mutex::new(CallState::default())),
        })
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().call_count
    }

    /// Whether any call has been refused since the last reset
    pub fn limit_reached(&self) -> bool {
        self.state.lock().limit_reached
    }

    pub fn phase(&self) -> GovernorPhase {
        self.classify(self.call_count())
    }

    /// Start a new logical run
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.call_count = 0;
        state.limit_reached = false;
    }

    fn classify(&self, call_count: usize) -> GovernorPhase {
        use std::cmp::Ordering;
        match call_count.cmp(&self.max_calls) {
            Ordering::Less => GovernorPhase::Open,
            Ordering::Equal => GovernorPhase::LastCall,
            Ordering::Greater => GovernorPhase::Closed,
        }
    }

    /// Count one call and decide how to treat it
    fn admit(&self) -> GovernorPhase {
        let mut state = self.state.lock();
        state.call_count += 1;
        let phase = self.classify(state.call_count);
        if phase == GovernorPhase::Closed {
            state.limit_reached = true;
        }
        phase
    }

    /// Decorate a tool entry point
    ///
    /// The returned function has the same argument and output types. The
    /// count is taken when the function is called, before the inner future
    /// is created.
    pub fn wrap<A, F, Fut, R>(&self, call: F) -> GovernedFn<A, R>
    where
        A: Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: GovernedResponse + Send + 'static,
    {
        let governor = self.clone();

        Arc::new(move |args: A| -> BoxFuture<'static, R> {
            let max_calls = governor.max_calls;

            match governor.admit() {
                GovernorPhase::Closed => {
                    tracing::warn!(
                        call_count = governor.call_count(),
                        max_calls,
                        "Tool call refused, limit reached"
                    );
                    Box::pin(async move { R::limit_reached(&limit_reached_notice(max_calls)) })
                }
                GovernorPhase::LastCall => {
                    tracing::info!(max_calls, "Forwarding last allowed tool call");
                    let pending = call(args);
                    Box::pin(async move {
                        let mut response = pending.await;
                        if !response.append_notice(&last_call_warning(max_calls)) {
                            tracing::debug!("Response shape cannot carry the last-call warning");
                        }
                        response
                    })
                }
                GovernorPhase::Open => Box::pin(call(args)),
            }
        })
    }
}
