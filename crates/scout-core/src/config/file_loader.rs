//! File-based configuration loading

use super::model::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use std::fs;
use std::path::Path;

/// Load configuration from a TOML file
///
/// Missing sections and fields fall back to their defaults.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoutResult<ScoutConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        ScoutError::config_with_context(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        ScoutError::config_with_context(
            format!("Failed to parse config file: {}", e),
            path.display().to_string(),
        )
    })
}
