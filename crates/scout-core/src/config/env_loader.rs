//! Environment variable-based configuration loading

use super::model::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use std::env;
use std::str::FromStr;

/// Load configuration from the process environment
///
/// A `.env` file in the working directory (or a parent) is read first;
/// variables already set in the environment take precedence over it.
pub fn load_from_env() -> ScoutResult<ScoutConfig> {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    load_from_lookup(|key| env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup
///
/// Recognized variables:
/// - `SEARCH_BACKEND`: `sourcegraph` or `zoekt`
/// - `SRC_ENDPOINT`, `SRC_ACCESS_TOKEN`
/// - `ZOEKT_API_URL`
/// - `DEFAULT_MAX_TOOL_CALLS`, `DEFAULT_MAX_TOKENS`
/// - `SCOUT_MAX_LINE_LENGTH`, `SCOUT_NUM_RESULTS`
pub fn load_from_lookup<F>(lookup: F) -> ScoutResult<ScoutConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = ScoutConfig::default();

    if let Some(backend) = get("SEARCH_BACKEND") {
        config.backend = backend.parse()?;
    }

    config.sourcegraph.endpoint = get("SRC_ENDPOINT");
    config.sourcegraph.token = get("SRC_ACCESS_TOKEN");
    config.zoekt.base_url = get("ZOEKT_API_URL");

    if let Some(value) = get("DEFAULT_MAX_TOOL_CALLS") {
        config.limits.max_tool_calls = parse_var("DEFAULT_MAX_TOOL_CALLS", &value)?;
    }
    if let Some(value) = get("DEFAULT_MAX_TOKENS") {
        config.limits.max_tokens = parse_var("DEFAULT_MAX_TOKENS", &value)?;
    }
    if let Some(value) = get("SCOUT_MAX_LINE_LENGTH") {
        config.output.max_line_length = parse_var("SCOUT_MAX_LINE_LENGTH", &value)?;
    }
    if let Some(value) = get("SCOUT_NUM_RESULTS") {
        config.output.num_results = parse_var("SCOUT_NUM_RESULTS", &value)?;
    }

    Ok(config)
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> ScoutResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScoutError::config_field(format!("Invalid {} value: {}", key, value), key))
}
