//! A deterministic stand-in for the chat model.
//!
//! `ScriptedModel` replays a fixed list of tool calls through the executor it
//! is handed, then returns a fixed reply. It keeps scenarios reproducible and
//! lets tests observe whether the model was reached at all.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use folioguard_contracts::{
    error::FolioGuardResult,
    message::Message,
    tool::ToolCall,
    turn::ModelReply,
};
use folioguard_core::traits::{ChatModel, ToolExecutor};

pub struct ScriptedModel {
    reply: String,
    script: Vec<ToolCall>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            script: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a tool call to replay before replying.
    pub fn calling(mut self, tool_name: impl Into<String>, arguments: Value) -> Self {
        self.script.push(ToolCall {
            name: tool_name.into(),
            arguments,
        });
        self
    }

    /// How many times `respond` has run.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn respond(
        &self,
        messages: &[Message],
        tools: &dyn ToolExecutor,
    ) -> FolioGuardResult<ModelReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(history = messages.len(), tool_calls = self.script.len(), "scripted model responding");

        for call in &self.script {
            tools.execute(&call.name, call.arguments.clone()).await;
        }

        Ok(ModelReply {
            text: self.reply.clone(),
            tool_calls: self.script.clone(),
        })
    }
}
