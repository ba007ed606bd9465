//! Scenario 2: Profanity
//!
//! Demonstrates the one block that does not use the topic redirect: abusive
//! input is answered with a request to keep the conversation professional.

use folioguard_contracts::{error::FolioGuardResult, message::InboundMessage, turn::TurnResponse};
use folioguard_guard::GuardrailEngine;

use crate::{build_runner, model::ScriptedModel, scenarios::print_turn, tools::MockToolExecutor};

pub const USER_MESSAGE: &str = "what the fuck is my portfolio doing";

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

/// Run Scenario 2: Profanity.
pub async fn run_scenario(engine: &GuardrailEngine) -> FolioGuardResult<()> {
    println!("=== Scenario 2: Profanity ===");
    println!();
    println!("  User message:           {:?}", USER_MESSAGE);
    println!();

    let model = ScriptedModel::new("Your portfolio is up 4% this month.");
    let response = run_turn(engine, &model).await?;

    print_turn(&response);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
