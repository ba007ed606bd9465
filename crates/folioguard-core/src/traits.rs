//! Core trait definitions for the FolioGuard turn pipeline.
//!
//! These five traits define the trust boundary of a chat turn:
//!
//! - `InputGuard`       - trusted gate on client input (before the model)
//! - `ChatModel`        - untrusted logic (an LLM driving a tool loop)
//! - `ToolExecutor`     - external collaborator answering tool calls
//! - `OutputGuard`      - trusted gate on model output (after the model)
//! - `ResponseVerifier` - trusted checker scoring the tool-grounded reply
//!
//! The turn runner wires them together in the correct order. The model is
//! never called unless the input guard lets the last user message through.

use async_trait::async_trait;
use serde_json::Value;

use folioguard_contracts::{
    error::FolioGuardResult,
    filter::{FilterVerdict, PostFilterReport},
    message::{InboundMessage, Message},
    tool::ToolResult,
    turn::ModelReply,
    verify::VerificationOutcome,
};

/// The input guard: validates client messages and screens the user's latest
/// message before any model call.
///
/// Implementations are pure and must not perform I/O.
pub trait InputGuard: Send + Sync {
    /// Drop forged roles, truncate oversized content, keep the most recent
    /// messages.
    fn validate_messages(&self, messages: Vec<InboundMessage>) -> Vec<Message>;

    /// Decide whether `user_message` may reach the model.
    fn pre_filter(&self, user_message: &str) -> FilterVerdict;
}

/// The output guard: screens the model's reply before the user sees it.
pub trait OutputGuard: Send + Sync {
    /// Inspect `response_text` in the context of the question that produced it.
    fn post_filter(&self, response_text: &str, user_message: &str) -> PostFilterReport;
}

/// The verifier: sanity-checks tool-grounded claims without calling the model.
pub trait ResponseVerifier: Send + Sync {
    /// Run every applicable domain check and compute a confidence score.
    fn verify(&self, tool_results: &[ToolResult], response_text: &str) -> VerificationOutcome;
}

/// Answers one named tool call with a JSON result carrying `success`.
///
/// Tool failures are reported in-band (`"success": false`), never as `Err`,
/// so the verifier can branch on them.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, tool_name: &str, arguments: Value) -> Value;
}

/// The LLM plus its tool-calling loop.
///
/// Implementations call `tools` as often as they like and must return only
/// after the loop has fully drained.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn respond(
        &self,
        messages: &[Message],
        tools: &dyn ToolExecutor,
    ) -> FolioGuardResult<ModelReply>;
}
