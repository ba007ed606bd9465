//! # folioguard-verify
//!
//! Post-hoc verification of tool-grounded chat responses.
//!
//! [`ResponseChecker`] implements the
//! [`ResponseVerifier`](folioguard_core::traits::ResponseVerifier) trait. It
//! runs deterministic domain checks over the tool results of a completed turn
//! (allocation sums, market prices, tax totals, hallucinated tickers, ...)
//! and blends four factors into a 0-100 confidence score. The model is never
//! consulted.
//!
//! Portfolio-specific checks beyond the built-in set are added with
//! [`ResponseChecker::register_check`].

pub mod checks;
pub mod confidence;
pub mod engine;
pub mod symbols;

pub use engine::{CustomCheckFn, ResponseChecker};

use folioguard_contracts::{tool::ToolResult, verify::VerificationOutcome};

/// Verify `tool_results` against `response_text` with the built-in checks.
pub fn verify_response(tool_results: &[ToolResult], response_text: &str) -> VerificationOutcome {
    ResponseChecker::new().verify_response(tool_results, response_text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
