//! Text injected into agent runs

/// Synthetic response returned once the call limit is exceeded
pub fn limit_reached_notice(max_calls: usize) -> String {
    format!(
        "TOOL CALL LIMIT REACHED: You have made {} tool calls, which is the maximum allowed. \
         Please provide your final response based on the information you have gathered so far. \
         No more tool calls will be processed.",
        max_calls
    )
}

/// Appended to the result of the last allowed call
pub fn last_call_warning(max_calls: usize) -> String {
    format!(
        "\n\nWARNING: This is your last tool call ({}/{}). \
         After this, you must provide your final response.",
        max_calls, max_calls
    )
}

/// Injected once per run when token usage crosses the effective limit
pub fn token_limit_warning(total_tokens: u64, max_tokens: u64) -> String {
    format!(
        "TOKEN LIMIT WARNING: You have used {} tokens out of a maximum {}. \
         You are approaching the token limit. Please provide your final response immediately \
         based on the information you have gathered so far. Keep your response concise to stay \
         within the remaining {} tokens.",
        total_tokens,
        max_tokens,
        max_tokens.saturating_sub(total_tokens)
    )
}

/// System prompt addendum describing both limits to the agent
pub fn resource_limits_notice(max_tool_calls: usize, max_tokens: u64) -> String {
    format!(
        "\n\nIMPORTANT RESOURCE LIMITS:\n\
         1. TOOL CALLS: You have a maximum of {} tool calls available.\n\
         2. TOKENS: You have a maximum of {} tokens available (including input and output).\n\
         3. When you receive a 'TOOL CALL LIMIT REACHED' or 'TOKEN LIMIT WARNING' message, \
         you MUST provide your final response immediately.\n\
         4. Plan your tool usage strategically to gather the most important information within these limits.",
        max_tool_calls, max_tokens
    )
}
