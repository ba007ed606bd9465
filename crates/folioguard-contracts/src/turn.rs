//! Per-turn identifiers and the response handed back to the chat client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    filter::{FilterVerdict, PostFilterReport},
    tool::ToolCall,
    verify::VerificationOutcome,
};

/// Unique identifier for one chat turn.
///
/// Appears in every log line the turn runner emits so a turn can be traced
/// across the pre-filter, model call, post-filter and verification stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub uuid::Uuid);

impl TurnId {
    /// Create a new, unique turn ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the model loop produced before any output filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReply {
    pub text: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// The filtered, verified result of one chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub turn_id: TurnId,
    /// When the runner received the turn.
    pub started_at: DateTime<Utc>,
    /// Final text for the user: model output, a correction, or a redirect.
    pub message: String,
    /// Tool calls the model made. Empty when the pre-filter blocked.
    pub tool_calls: Vec<ToolCall>,
    pub verification: VerificationOutcome,
    pub pre_filter: FilterVerdict,
    /// Absent when the model was never called.
    pub post_filter: Option<PostFilterReport>,
    pub duration_ms: u64,
}

impl TurnResponse {
    /// True when the pre-filter short-circuited the turn.
    pub fn was_blocked(&self) -> bool {
        self.pre_filter.blocked
    }
}
