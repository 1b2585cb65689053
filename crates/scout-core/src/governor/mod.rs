//! Resource governors for agent runs
//!
//! Two independent limits sit around an agent's execution loop:
//!
//! - [`ToolCallGovernor`] decorates the tool entry point, counting calls,
//!   warning on the last allowed one and answering every later call with
//!   a synthetic notice instead of forwarding it.
//! - [`TokenBudgetGovernor`] drives a [`SteppedExecution`] and pushes one
//!   warning into it when cumulative usage crosses the effective limit.
//!
//! Neither governor terminates a run. Both rely on the agent honoring the
//! notices they inject. Each logical run should own its governors, or call
//! [`ToolCallGovernor::reset`] between runs.

mod execution;
mod notices;
mod token_budget;
mod tool_calls;


pub use execution::{
    ChannelExecution, ControlMessage, ExecutionDriver, ExecutionStep, SteppedExecution,
    TokenUsage, execution_channel,
};
pub use notices::{
    last_call_warning, limit_reached_notice, resource_limits_notice, token_limit_warning,
};
pub use token_budget::{DEFAULT_BUFFER_TOKENS, DEFAULT_MAX_TOKENS, TokenBudgetGovernor};
pub use tool_calls::{
    DEFAULT_MAX_TOOL_CALLS, GovernedFn, GovernedResponse, GovernorPhase, ToolCallGovernor,
};
