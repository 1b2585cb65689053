//! Step-by-step executions a token governor can observe

use crate::error::{ScoutError, ScoutResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Cumulative token usage of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// One step of an execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStep<T> {
    /// Model request, tool call, or any other non-final step
    Intermediate,
    /// The run's final result
    End(T),
}

/// Instruction pushed back into a running execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Ask the model to retry with the given instruction
    RetryPrompt { content: String },
}

impl ControlMessage {
    pub fn retry_prompt(content: impl Into<String>) -> Self {
        Self::RetryPrompt {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::RetryPrompt { content } => content,
        }
    }
}

/// A multi-step run that reports usage and accepts control messages
#[async_trait]
pub trait SteppedExecution: Send {
    type Output: Send;

    /// Advance to the next step; `None` once the run is over
    async fn next_step(&mut self) -> ScoutResult<Option<ExecutionStep<Self::Output>>>;

    /// Usage so far, if the run reports any
    fn usage(&self) -> Option<TokenUsage>;

    /// Push a control message into the run
    async fn inject(&mut self, message: ControlMessage) -> ScoutResult<()>;
}

/// Step report sent by a driver
#[derive(Debug)]
struct StepReport<T> {
    step: ExecutionStep<T>,
    usage: Option<TokenUsage>,
}

/// Governor side of a channel-backed execution
#[derive(Debug)]
pub struct ChannelExecution<T> {
    steps: mpsc::Receiver<StepReport<T>>,
    control: mpsc::Sender<ControlMessage>,
    usage: Option<TokenUsage>,
}

/// Agent-loop side of a channel-backed execution
#[derive(Debug)]
pub struct ExecutionDriver<T> {
    steps: mpsc::Sender<StepReport<T>>,
    control: mpsc::Receiver<ControlMessage>,
}

/// Create a connected execution and driver
///
/// The agent loop keeps the driver, reporting each step with its usage and
/// draining control messages between steps. The execution half goes to
/// [`TokenBudgetGovernor::run_with_limit`](super::TokenBudgetGovernor::run_with_limit).
pub fn execution_channel<T>(capacity: usize) -> (ChannelExecution<T>, ExecutionDriver<T>) {
    let capacity = capacity.max(1);
    let (step_tx, step_rx) = mpsc::channel(capacity);
    let (control_tx, control_rx) = mpsc::channel(capacity);

    (
        ChannelExecution {
            steps: step_rx,
            control: control_tx,
            usage: None,
        },
        ExecutionDriver {
            steps: step_tx,
            control: control_rx,
        },
    )
}

#[async_trait]
impl<T: Send> SteppedExecution for ChannelExecution<T> {
    type Output = T;

    async fn next_step(&mut self) -> ScoutResult<Option<ExecutionStep<T>>> {
        match self.steps.recv().await {
            Some(report) => {
                if report.usage.is_some() {
                    self.usage = report.usage;
                }
                Ok(Some(report.step))
            }
            None => Ok(None),
        }
    }

    fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }

    async fn inject(&mut self, message: ControlMessage) -> ScoutResult<()> {
        self.control
            .try_send(message)
            .map_err(|e| ScoutError::execution(format!("Failed to deliver control message: {}", e)))
    }
}

impl<T> ExecutionDriver<T> {
    /// Report a non-final step and the usage after it
    ///
    /// # Errors
    ///
    /// Returns an execution error when the governor side is gone.
    pub async fn step(&self, usage: Option<TokenUsage>) -> ScoutResult<()> {
        self.send(ExecutionStep::Intermediate, usage).await
    }

    /// Report the final result
    ///
    /// # Errors
    ///
    /// Returns an execution error when the governor side is gone.
    pub async fn finish(&self, output: T, usage: Option<TokenUsage>) -> ScoutResult<()> {
        self.send(ExecutionStep::End(output), usage).await
    }

    /// Next pending control message, without waiting
    pub fn try_control(&mut self) -> Option<ControlMessage> {
        self.control.try_recv().ok()
    }

    async fn send(&self, step: ExecutionStep<T>, usage: Option<TokenUsage>) -> ScoutResult<()> {
        self.steps
            .send(StepReport { step, usage })
            .await
            .map_err(|_| ScoutError::execution("Execution receiver dropped"))
    }
}
