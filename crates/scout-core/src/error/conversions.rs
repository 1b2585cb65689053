//! From trait implementations for ScoutError conversions

use super::types::ScoutError;

impl From<reqwest::Error> for ScoutError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::SearchTransport {
            message: error.to_string(),
            url,
            status_code,
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", error))
    }
}

impl From<toml::de::Error> for ScoutError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_with_context(error.to_string(), "Failed to parse TOML configuration")
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(error: std::io::Error) -> Self {
        Self::config_with_context(error.to_string(), "Failed to read configuration file")
    }
}
