//! A portfolio tool backend served entirely from `mock_data`.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use folioguard_core::traits::ToolExecutor;

use crate::mock_data;

/// Tools the reference backend knows how to answer.
pub const TOOL_NAMES: &[&str] = &[
    "portfolio_summary",
    "tax_estimate",
    "portfolio_performance",
    "dividend_history",
    "portfolio_report",
    "account_overview",
    "investment_timeline",
    "market_data",
];

/// Answers tool calls with fictional portfolio data.
///
/// Tools named in `unavailable` answer `"success": false`, simulating a
/// backend outage for that tool.
#[derive(Debug, Default)]
pub struct MockToolExecutor {
    unavailable: HashSet<String>,
}

impl MockToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `tool_name` fail on every call.
    pub fn with_outage(mut self, tool_name: impl Into<String>) -> Self {
        self.unavailable.insert(tool_name.into());
        self
    }

    fn dispatch(&self, tool_name: &str, arguments: &Value) -> Value {
        if self.unavailable.contains(tool_name) {
            return json!({
                "success": false,
                "error": format!("Failed to fetch {}", tool_name)
            });
        }
        match tool_name {
            "portfolio_summary" => mock_data::portfolio_summary(),
            "tax_estimate" => mock_data::tax_estimate(),
            "portfolio_performance" => {
                let range = arguments.get("range").and_then(Value::as_str).unwrap_or("ytd");
                mock_data::portfolio_performance(range)
            }
            "dividend_history" => mock_data::dividend_history(),
            "portfolio_report" => mock_data::portfolio_report(),
            "account_overview" => mock_data::account_overview(),
            "investment_timeline" => mock_data::investment_timeline(),
            "market_data" => {
                let symbol = arguments.get("symbol").and_then(Value::as_str).unwrap_or("");
                mock_data::market_data(symbol)
            }
            other => json!({
                "success": false,
                "error": format!("Unknown tool: {}", other)
            }),
        }
    }
}

#[async_trait]
impl ToolExecutor for MockToolExecutor {
    async fn execute(&self, tool_name: &str, arguments: Value) -> Value {
        let result = self.dispatch(tool_name, &arguments);
        debug!(tool = %tool_name, "mock tool answered");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_listed_tool_succeeds() {
        let tools = MockToolExecutor::new();
        for name in TOOL_NAMES {
            let args = json!({ "symbol": "AAPL" });
            let result = tools.execute(name, args).await;
            assert_eq!(result["success"], json!(true), "tool {} failed: {}", name, result);
        }
    }

    #[tokio::test]
    async fn unknown_tool_reports_failure() {
        let result = MockToolExecutor::new().execute("wire_transfer", json!({})).await;
        assert_eq!(result["success"], json!(false));
        assert_eq!(result["error"], json!("Unknown tool: wire_transfer"));
    }

    #[tokio::test]
    async fn outage_fails_only_the_named_tool() {
        let tools = MockToolExecutor::new().with_outage("tax_estimate");
        let tax = tools.execute("tax_estimate", json!({})).await;
        let summary = tools.execute("portfolio_summary", json!({})).await;
        assert_eq!(tax["success"], json!(false));
        assert_eq!(summary["success"], json!(true));
    }

    #[tokio::test]
    async fn performance_echoes_the_requested_range() {
        let result = MockToolExecutor::new()
            .execute("portfolio_performance", json!({ "range": "1y" }))
            .await;
        assert_eq!(result["range"], json!("1y"));
    }
}
