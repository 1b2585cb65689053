//! Tool invocation and result types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One tool call issued by an agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, Value>>,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Default::default()
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// String argument by name
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

/// Content block of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Result of a tool call, shaped like an MCP `tools/call` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: true,
        }
    }

    /// All text blocks concatenated
    pub fn joined_text(&self) -> String {
        self.content.iter().map(ToolContent::as_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_wire_shape() {
        let value = serde_json::to_value(ToolCallResult::text("hello")).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "hello" }], "isError": false })
        );
    }

    #[test]
    fn test_invocation_arguments() {
        let call = ToolInvocation::new("fetch_content")
            .with_argument("repo", "github.com/a/b")
            .with_argument("depth", 3);
        assert_eq!(call.str_arg("repo"), Some("github.com/a/b"));
        assert_eq!(call.str_arg("depth"), None);
        assert_eq!(call.str_arg("path"), None);
    }
}
