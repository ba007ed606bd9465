//! Tool call and tool result types.
//!
//! Tool payloads are backend-specific JSON; the guardrail pipeline only relies
//! on the `success` flag and a handful of well-known fields read by the
//! verifier.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tool invocation the model requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// The structured output of one tool invocation during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name, e.g. "portfolio_summary".
    #[serde(rename = "tool")]
    pub tool_name: String,
    /// The tool's JSON result. Expected to carry a boolean `success` field.
    pub result: Value,
}

impl ToolResult {
    pub fn new(tool_name: impl Into<String>, result: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            result,
        }
    }

    /// True only when the result reports `"success": true`.
    ///
    /// A missing or non-boolean flag counts as failure.
    pub fn succeeded(&self) -> bool {
        self.result
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
