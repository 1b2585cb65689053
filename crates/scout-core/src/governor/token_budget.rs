//! Token budget observation

use super::execution::{ControlMessage, ExecutionStep, SteppedExecution};
use super::notices::token_limit_warning;
use crate::error::{ScoutError, ScoutResult};

/// Default token ceiling per run
pub const DEFAULT_MAX_TOKENS: u64 = 190_000;

/// Default headroom kept for the final response
pub const DEFAULT_BUFFER_TOKENS: u64 = 5_000;

/// Warns a run once when it nears its token ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudgetGovernor {
    max_tokens: u64,
    buffer_tokens: u64,
    effective_limit: u64,
}

impl Default for TokenBudgetGovernor {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            buffer_tokens: DEFAULT_BUFFER_TOKENS,
            effective_limit: DEFAULT_MAX_TOKENS - DEFAULT_BUFFER_TOKENS,
        }
    }
}

impl TokenBudgetGovernor {
    /// Create a governor warning at `max_tokens - buffer_tokens`
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `buffer_tokens < max_tokens`.
    pub fn new(max_tokens: u64, buffer_tokens: u64) -> ScoutResult<Self> {
        if buffer_tokens >= max_tokens {
            return Err(ScoutError::config_field(
                format!(
                    "buffer_tokens ({}) must be smaller than max_tokens ({})",
                    buffer_tokens, max_tokens
                ),
                "buffer_tokens",
            ));
        }

        Ok(Self {
            max_tokens,
            buffer_tokens,
            effective_limit: max_tokens - buffer_tokens,
        })
    }

    pub fn max_tokens(&self) -> u64 {
        self.max_tokens
    }

    pub fn buffer_tokens(&self) -> u64 {
        self.buffer_tokens
    }

    pub fn effective_limit(&self) -> u64 {
        self.effective_limit
    }

    /// Drive an execution to its final result
    ///
    /// After every intermediate step the run's usage is compared with the
    /// effective limit. The first time it is reached a retry prompt is
    /// injected; that happens at most once per call. Injection failures
    /// are logged and ignored.
    ///
    /// # Errors
    ///
    /// Propagates step errors, and returns `ScoutError::Execution` when the
    /// run ends without a final step.
    pub async fn run_with_limit<E>(&self, mut execution: E) -> ScoutResult<E::Output>
    where
        E: SteppedExecution,
    {
        let mut warned = false;
        let mut steps = 0usize;

        loop {
            match execution.next_step().await? {
                Some(ExecutionStep::End(output)) => {
                    tracing::debug!(steps, warned, "Execution finished");
                    return Ok(output);
                }
                Some(ExecutionStep::Intermediate) => {
                    steps += 1;
                    if warned {
                        continue;
                    }

                    let total = execution.usage().map(|u| u.total()).unwrap_or(0);
                    if total < self.effective_limit {
                        continue;
                    }

                    warned = true;
                    tracing::warn!(
                        total_tokens = total,
                        max_tokens = self.max_tokens,
                        "Token limit approaching, asking for a final response"
                    );

                    let message =
                        ControlMessage::retry_prompt(token_limit_warning(total, self.max_tokens));
                    if let Err(e) = execution.inject(message).await {
                        tracing::debug!("Token limit warning not delivered: {}", e);
                    }
                }
                None => {
                    return Err(ScoutError::execution_with_context(
                        "Execution ended without a final result",
                        format!("after {} steps", steps),
                    ));
                }
            }
        }
    }
}
