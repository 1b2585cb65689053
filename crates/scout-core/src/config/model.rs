//! Configuration data structures

use crate::error::{ScoutError, ScoutResult};
use crate::factory::{BackendKind, BackendOptions, DEFAULT_MAX_OUTPUT_LENGTH};
use crate::governor::{DEFAULT_BUFFER_TOKENS, DEFAULT_MAX_TOKENS, DEFAULT_MAX_TOOL_CALLS};
use crate::search::DEFAULT_MAX_LINE_LENGTH;
use serde::{Deserialize, Serialize};

/// Default number of results returned by the search tool
pub const DEFAULT_NUM_RESULTS: usize = 30;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub backend: BackendKind,
    pub sourcegraph: SourcegraphConfig,
    pub zoekt: ZoektConfig,
    pub output: OutputConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcegraphConfig {
    pub endpoint: Option<String>,
    /// Optional for public instances
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoektConfig {
    pub base_url: Option<String>,
}

/// Output shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub max_line_length: usize,
    pub max_output_length: usize,
    pub num_results: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_output_length: DEFAULT_MAX_OUTPUT_LENGTH,
            num_results: DEFAULT_NUM_RESULTS,
        }
    }
}

/// Agent resource limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_tool_calls: usize,
    pub max_tokens: u64,
    pub buffer_tokens: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tool_calls: DEFAULT_MAX_TOOL_CALLS,
            max_tokens: DEFAULT_MAX_TOKENS,
            buffer_tokens: DEFAULT_BUFFER_TOKENS,
        }
    }
}

impl ScoutConfig {
    /// Check that the selected backend has what it needs
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Config` naming the first invalid field.
    pub fn validate(&self) -> ScoutResult<()> {
        match self.backend {
            BackendKind::Sourcegraph if is_blank(&self.sourcegraph.endpoint) => {
                return Err(ScoutError::config_field(
                    "SRC_ENDPOINT is required for the sourcegraph backend",
                    "sourcegraph.endpoint",
                ));
            }
            BackendKind::Zoekt if is_blank(&self.zoekt.base_url) => {
                return Err(ScoutError::config_field(
                    "ZOEKT_API_URL is required for the zoekt backend",
                    "zoekt.base_url",
                ));
            }
            _ => {}
        }

        if self.output.max_line_length < 4 {
            return Err(ScoutError::config_field(
                "max_line_length must be at least 4",
                "output.max_line_length",
            ));
        }
        if self.output.num_results == 0 {
            return Err(ScoutError::config_field(
                "num_results must be positive",
                "output.num_results",
            ));
        }
        if self.limits.max_tool_calls == 0 {
            return Err(ScoutError::config_field(
                "max_tool_calls must be positive",
                "limits.max_tool_calls",
            ));
        }
        if self.limits.buffer_tokens >= self.limits.max_tokens {
            return Err(ScoutError::config_field(
                "buffer_tokens must be smaller than max_tokens",
                "limits.buffer_tokens",
            ));
        }

        Ok(())
    }

    /// Options bag for the backend factory
    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            endpoint: self.sourcegraph.endpoint.clone(),
            token: self.sourcegraph.token.clone(),
            base_url: self.zoekt.base_url.clone(),
            max_line_length: self.output.max_line_length,
            max_output_length: self.output.max_output_length,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
