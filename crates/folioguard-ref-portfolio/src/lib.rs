//! # folioguard-ref-portfolio
//!
//! Portfolio reference runtime for the FolioGuard chat guardrails.
//!
//! Demonstrates four chat scenarios using mock data:
//!
//! 1. **Prompt Injection**: a forged system message and an override request
//!    are stopped before the model is called.
//! 2. **Profanity**: abusive input gets the professional-tone redirect.
//! 3. **Tone Hijack**: a persona request passes the pre-filter, and the
//!    post-filter replaces the pirate-voiced reply.
//! 4. **Grounded Summary**: tool-backed answers are verified, and a
//!    fabricated ticker is caught.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod mock_data;
pub mod model;
pub mod scenarios;
pub mod tools;

use serde_json::Value;

use folioguard_contracts::{error::FolioGuardResult, verify::VerificationCheck};
use folioguard_core::TurnRunner;
use folioguard_guard::GuardrailEngine;
use folioguard_verify::ResponseChecker;

/// Guardrail limits used by every scenario.
pub const GUARDRAILS_TOML: &str = include_str!("../config/guardrails.toml");

/// Largest single-holding allocation, in percent, before the concentration
/// check fails.
pub const MAX_POSITION_PERCENT: f64 = 40.0;

/// Build the checker used by the reference runtime: the built-in checks plus
/// a `position_concentration` rule on `portfolio_summary`.
pub fn portfolio_checker() -> ResponseChecker {
    let mut checker = ResponseChecker::new();
    checker.register_check(
        "portfolio_summary",
        Box::new(|result: &Value, _response: &str| position_concentration(result)),
    );
    checker
}

/// The guardrail engine configured from the bundled `config/guardrails.toml`.
pub fn bundled_engine() -> FolioGuardResult<GuardrailEngine> {
    GuardrailEngine::from_toml_str(GUARDRAILS_TOML)
}

/// Wire `engine` and the portfolio checker into a turn runner.
pub fn build_runner(engine: &GuardrailEngine) -> TurnRunner {
    TurnRunner::new(
        Box::new(engine.clone()),
        Box::new(engine.clone()),
        Box::new(portfolio_checker()),
    )
}

fn position_concentration(result: &Value) -> VerificationCheck {
    let holdings = result
        .get("holdings")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let concentrated: Vec<String> = holdings
        .iter()
        .filter_map(|h| {
            let pct = h.get("allocationInPercentage").and_then(Value::as_f64)?;
            (pct > MAX_POSITION_PERCENT).then(|| {
                let symbol = h.get("symbol").and_then(Value::as_str).unwrap_or("?");
                format!("{} ({:.1}%)", symbol, pct)
            })
        })
        .collect();

    if concentrated.is_empty() {
        VerificationCheck::new(
            "position_concentration",
            true,
            format!("No holding exceeds {:.0}% of the portfolio", MAX_POSITION_PERCENT),
        )
    } else {
        VerificationCheck::new(
            "position_concentration",
            false,
            format!(
                "Holdings above {:.0}% of the portfolio: {}",
                MAX_POSITION_PERCENT,
                concentrated.join(", ")
            ),
        )
    }
}
