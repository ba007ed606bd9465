//! Scenario 4: Grounded Summary
//!
//! Demonstrates post-hoc verification of tool-backed answers. Two turns ask
//! for the same summary:
//!
//!   - **Grounded**: the reply only names held symbols; every check passes,
//!     including the custom `position_concentration` rule
//!   - **Hallucinated**: the reply recommends tickers the portfolio does not
//!     hold; `no_hallucinated_symbols` fails and names them
//!
//! Neither reply is filtered; verification reports on the turn without
//! rewriting it.

use serde_json::json;

use folioguard_contracts::{error::FolioGuardResult, message::InboundMessage, turn::TurnResponse};
use folioguard_guard::GuardrailEngine;

use crate::{build_runner, model::ScriptedModel, scenarios::print_turn, tools::MockToolExecutor};

pub const USER_MESSAGE: &str = "Give me a summary of my portfolio and this year's tax picture";

pub const GROUNDED_REPLY: &str = "Your portfolio is worth $48,210.55 across AAPL, MSFT, GOOGL, \
NVDA and VTI. AAPL is the largest position at 30%. Estimated tax on unrealized gains is $1,480.56.";

pub const HALLUCINATED_REPLY: &str = "Your portfolio is worth $48,210.55 and NVDA is up strongly. \
You might also look at PLTR and RIVN for more growth exposure.";

pub fn summary_model(reply: &str) -> ScriptedModel {
    ScriptedModel::new(reply)
        .calling("portfolio_summary", json!({}))
        .calling("tax_estimate", json!({}))
}

pub async fn run_turn(
    engine: &GuardrailEngine,
    model: &ScriptedModel,
) -> FolioGuardResult<TurnResponse> {
    let runner = build_runner(engine);
    let tools = MockToolExecutor::new();
    runner
        .run_turn(vec![InboundMessage::new("user", USER_MESSAGE)], model, &tools)
        .await
}

/// Run Scenario 4: Grounded Summary.
pub async fn run_scenario(engine: &GuardrailEngine) -> FolioGuardResult<()> {
    println!("=== Scenario 4: Grounded Summary ===");
    println!();
    println!("  User message:           {:?}", USER_MESSAGE);
    println!("  Custom check:           position_concentration [REGISTERED]");
    println!();

    println!("  Case A: grounded reply");
    let grounded = run_turn(engine, &summary_model(GROUNDED_REPLY)).await?;
    print_turn(&grounded);
    println!();

    println!("  Case B: reply naming unheld tickers");
    let hallucinated = run_turn(engine, &summary_model(HALLUCINATED_REPLY)).await?;
    print_turn(&hallucinated);
    println!();

    println!(
        "  Confidence:             grounded {} vs hallucinated {}",
        grounded.verification.confidence.overall, hallucinated.verification.confidence.overall
    );
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}
