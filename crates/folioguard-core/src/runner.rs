//! The FolioGuard turn runner: the guardrail-bound chat turn.
//!
//! The runner enforces the turn model:
//!
//!   Validate → Pre-filter → [ChatModel + tools] → Post-filter → Verify
//!
//! The invariant is structural: `ChatModel::respond()` is only reachable after
//! the pre-filter lets the latest user message through. Tool results are read
//! for verification only after the model call returns, i.e. after the tool
//! loop has drained.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use folioguard_contracts::{
    error::{FolioGuardError, FolioGuardResult},
    filter::TOPIC_REDIRECT,
    message::{InboundMessage, Message, Role},
    tool::ToolResult,
    turn::{TurnId, TurnResponse},
};

use crate::traits::{ChatModel, InputGuard, OutputGuard, ResponseVerifier, ToolExecutor};

/// Wraps the caller's tool executor and records every `{tool, result}` pair
/// in call order.
pub struct ToolRecorder<'a> {
    inner: &'a dyn ToolExecutor,
    results: Mutex<Vec<ToolResult>>,
}

impl<'a> ToolRecorder<'a> {
    pub fn new(inner: &'a dyn ToolExecutor) -> Self {
        Self {
            inner,
            results: Mutex::new(Vec::new()),
        }
    }

    /// Consume the recorder and return the results in call order.
    pub fn into_results(self) -> FolioGuardResult<Vec<ToolResult>> {
        self.results
            .into_inner()
            .map_err(|e| FolioGuardError::ToolRecordingFailed {
                reason: format!("tool result lock poisoned: {}", e),
            })
    }
}

#[async_trait]
impl<'a> ToolExecutor for ToolRecorder<'a> {
    async fn execute(&self, tool_name: &str, arguments: Value) -> Value {
        let result = self.inner.execute(tool_name, arguments).await;
        let record = ToolResult::new(tool_name, result.clone());
        debug!(tool = %tool_name, success = record.succeeded(), "tool call recorded");

        match self.results.lock() {
            Ok(mut results) => results.push(record),
            // into_results() surfaces the poisoned lock as an error.
            Err(_) => warn!(tool = %tool_name, "tool result lock poisoned, result dropped"),
        }
        result
    }
}

/// Drives one chat turn through the guardrail pipeline.
///
/// The runner owns the trusted components and is stateless across turns, so
/// one instance can serve any number of concurrent turns.
pub struct TurnRunner {
    input: Box<dyn InputGuard>,
    output: Box<dyn OutputGuard>,
    verifier: Box<dyn ResponseVerifier>,
}

impl TurnRunner {
    /// Create a runner from its trusted components.
    pub fn new(
        input: Box<dyn InputGuard>,
        output: Box<dyn OutputGuard>,
        verifier: Box<dyn ResponseVerifier>,
    ) -> Self {
        Self { input, output, verifier }
    }

    /// Execute one chat turn.
    ///
    /// # Pipeline
    ///
    /// 1. Validate inbound messages (forged roles dropped, content truncated,
    ///    oldest messages discarded beyond the count limit)
    /// 2. Pre-filter the latest user message; a block returns the redirect
    ///    immediately, with no tool calls and a vacuous verification
    /// 3. Call `model.respond()` with a recording tool executor
    /// 4. Post-filter the reply; a failed report substitutes the correction
    /// 5. Verify the recorded tool results against the final text
    ///
    /// # Errors
    ///
    /// Only model failures and tool-recording failures are errors. Blocks and
    /// failed checks are part of the returned `TurnResponse`.
    pub async fn run_turn(
        &self,
        inbound: Vec<InboundMessage>,
        model: &dyn ChatModel,
        tools: &dyn ToolExecutor,
    ) -> FolioGuardResult<TurnResponse> {
        let started = Instant::now();
        let started_at = Utc::now();
        let turn_id = TurnId::new();
        let inbound_count = inbound.len();

        // ── Step 1: Message validation ───────────────────────────────────────
        let messages = self.input.validate_messages(inbound);
        debug!(
            turn_id = %turn_id.0,
            inbound = inbound_count,
            kept = messages.len(),
            "messages validated"
        );

        let user_message = last_user_message(&messages);

        // ── Step 2: Pre-filter ───────────────────────────────────────────────
        //
        // The primary trust gate. The model is not called on a block.
        let verdict = self.input.pre_filter(user_message);

        if let Some(redirect) = verdict.redirect() {
            warn!(
                turn_id = %turn_id.0,
                reason = ?verdict.reason,
                "pre-filter blocked user message"
            );
            let message = redirect.to_string();
            let verification = self.verifier.verify(&[], &message);
            return Ok(TurnResponse {
                turn_id,
                started_at,
                message,
                tool_calls: Vec::new(),
                verification,
                pre_filter: verdict,
                post_filter: None,
                duration_ms: elapsed_ms(started),
            });
        }

        debug!(turn_id = %turn_id.0, reason = ?verdict.reason, "pre-filter allowed message");

        // ── Step 3: Model + tool loop ────────────────────────────────────────
        let recorder = ToolRecorder::new(tools);
        let reply = model.respond(&messages, &recorder).await?;
        let tool_results = recorder.into_results()?;

        // ── Step 4: Post-filter ──────────────────────────────────────────────
        let report = self.output.post_filter(&reply.text, user_message);
        let message = if report.passed {
            reply.text
        } else {
            warn!(
                turn_id = %turn_id.0,
                issues = report.issues.len(),
                "post-filter replaced model response"
            );
            report
                .corrected_response
                .clone()
                .unwrap_or_else(|| TOPIC_REDIRECT.to_string())
        };

        // ── Step 5: Verification ─────────────────────────────────────────────
        let verification = self.verifier.verify(&tool_results, &message);

        info!(
            turn_id = %turn_id.0,
            tool_calls = reply.tool_calls.len(),
            verified = verification.verified,
            confidence = verification.confidence.overall,
            "turn complete"
        );

        Ok(TurnResponse {
            turn_id,
            started_at,
            message,
            tool_calls: reply.tool_calls,
            verification,
            pre_filter: verdict,
            post_filter: Some(report),
            duration_ms: elapsed_ms(started),
        })
    }
}

/// Content of the most recent user message, or "" when there is none.
fn last_user_message(messages: &[Message]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ── Tests ────────────────────────────────────────────────────────────────────
