//! `ResponseChecker`: runs every applicable check over a turn's tool results.
//!
//! A check applies when its tool appears in the turn and that tool's result
//! reports `"success": true`. Results are indexed by tool name once per turn;
//! when a tool was called more than once, its first result wins.
//!
//! Custom checks are registered per tool by the hosting application and run
//! after the built-in ones, under the same success gate.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use folioguard_contracts::{
    tool::ToolResult,
    verify::{VerificationCheck, VerificationOutcome},
};
use folioguard_core::traits::ResponseVerifier;

use crate::{checks as builtin, confidence};

/// A caller-supplied check. Receives the tool's `result` object and the final
/// response text.
pub type CustomCheckFn = Box<dyn Fn(&Value, &str) -> VerificationCheck + Send + Sync>;

/// The FolioGuard response verifier.
pub struct ResponseChecker {
    /// Registered custom checks, in registration order.
    custom_checks: Vec<(String, CustomCheckFn)>,
}

impl ResponseChecker {
    /// Create a checker with only the built-in checks.
    pub fn new() -> Self {
        Self {
            custom_checks: Vec::new(),
        }
    }

    /// Register a custom check that runs whenever `tool_name` succeeded.
    ///
    /// Several checks may be registered for the same tool; they run in
    /// registration order.
    pub fn register_check(&mut self, tool_name: impl Into<String>, check: CustomCheckFn) {
        self.custom_checks.push((tool_name.into(), check));
    }

    /// Run all applicable checks and score the turn.
    pub fn verify_response(
        &self,
        tool_results: &[ToolResult],
        response_text: &str,
    ) -> VerificationOutcome {
        let mut by_tool: HashMap<&str, &ToolResult> = HashMap::new();
        for result in tool_results {
            by_tool.entry(result.tool_name.as_str()).or_insert(result);
        }

        let mut checks: Vec<VerificationCheck> = Vec::new();

        // ── Built-in checks ──────────────────────────────────────────────────
        if let Some(portfolio) = successful(&by_tool, "portfolio_summary") {
            checks.push(builtin::allocation_sum(portfolio));
            checks.push(builtin::valid_market_prices(portfolio));
        }
        if let Some(tax) = successful(&by_tool, "tax_estimate") {
            checks.push(builtin::tax_data_consistency(tax));
        }
        if let Some(portfolio) = successful(&by_tool, "portfolio_summary") {
            checks.push(builtin::no_hallucinated_symbols(portfolio, response_text));
        }
        if let Some(performance) = successful(&by_tool, "portfolio_performance") {
            checks.push(builtin::performance_data_valid(performance));
        }
        if let Some(dividends) = successful(&by_tool, "dividend_history") {
            checks.push(builtin::dividend_data_valid(dividends));
        }
        if let Some(report) = successful(&by_tool, "portfolio_report") {
            checks.push(builtin::report_structure_valid(report));
        }
        if let Some(accounts) = successful(&by_tool, "account_overview") {
            checks.push(builtin::account_data_valid(accounts));
        }
        if let Some(timeline) = successful(&by_tool, "investment_timeline") {
            checks.push(builtin::timeline_data_valid(timeline));
        }

        // ── Custom checks ────────────────────────────────────────────────────
        for (tool, check) in &self.custom_checks {
            if let Some(result) = successful(&by_tool, tool) {
                checks.push(check(result, response_text));
            }
        }

        for failed in checks.iter().filter(|c| !c.passed) {
            warn!(check = %failed.check_id, detail = %failed.detail, "verification check failed");
        }

        let verified = checks.iter().all(|c| c.passed);
        let confidence = confidence::score(tool_results, &checks, response_text);

        debug!(
            tools = tool_results.len(),
            checks = checks.len(),
            verified,
            confidence = confidence.overall,
            "response verified"
        );

        VerificationOutcome {
            verified,
            checks,
            confidence,
        }
    }
}

/// The payload of `tool`, if it was called and succeeded.
fn successful<'a>(by_tool: &HashMap<&str, &'a ToolResult>, tool: &str) -> Option<&'a Value> {
    by_tool
        .get(tool)
        .copied()
        .filter(|r| r.succeeded())
        .map(|r| &r.result)
}

impl Default for ResponseChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseVerifier for ResponseChecker {
    fn verify(&self, tool_results: &[ToolResult], response_text: &str) -> VerificationOutcome {
        self.verify_response(tool_results, response_text)
    }
}
