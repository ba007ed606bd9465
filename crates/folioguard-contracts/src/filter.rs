//! Guardrail verdict types.
//!
//! The pre-filter produces a `FilterVerdict`; the post-filter produces a
//! `PostFilterReport`. Both are data, never errors: a blocked turn still ends
//! with a user-facing message.

use serde::{Deserialize, Serialize};

/// Canned reply used for every block except profanity, and as the post-filter
/// correction.
pub const TOPIC_REDIRECT: &str = "I'm a financial portfolio assistant. I can help you with portfolio analysis, \
market data, transactions, risk assessment, tax estimates, performance tracking, \
dividends, and account information. What would you like to know about your investments?";

/// Canned reply used when the pre-filter blocks profanity.
pub const PROFANITY_REDIRECT: &str = "I'd appreciate it if we keep our conversation professional. \
I'm here to help with your portfolio analysis and financial questions. \
What would you like to know about your investments?";

/// Why the pre-filter reached its decision.
///
/// The first seven variants block; the rest describe which allow path a
/// message took and exist for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterReason {
    InputTooLong,
    EncodedPayload,
    EncodingRequest,
    DelimiterInjection,
    Manipulation,
    MultilingualInjection,
    Profanity,
    Greeting,
    ToneDeferred,
    OnTopic,
    ShortMessage,
    OffTopicDeferred,
}

impl FilterReason {
    /// True for reasons that stop the turn before the model is called.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            FilterReason::InputTooLong
                | FilterReason::EncodedPayload
                | FilterReason::EncodingRequest
                | FilterReason::DelimiterInjection
                | FilterReason::Manipulation
                | FilterReason::MultilingualInjection
                | FilterReason::Profanity
        )
    }
}

/// Outcome of the pre-filter for a single user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterVerdict {
    pub blocked: bool,
    pub reason: Option<FilterReason>,
    /// Present exactly when `blocked` is true.
    pub redirect_text: Option<String>,
}

impl FilterVerdict {
    /// Let the message through, recording which allow path was taken.
    pub fn allow(reason: FilterReason) -> Self {
        Self {
            blocked: false,
            reason: Some(reason),
            redirect_text: None,
        }
    }

    /// Block the message and answer with the redirect matching `reason`.
    pub fn block(reason: FilterReason) -> Self {
        let redirect = match reason {
            FilterReason::Profanity => PROFANITY_REDIRECT,
            _ => TOPIC_REDIRECT,
        };
        Self {
            blocked: true,
            reason: Some(reason),
            redirect_text: Some(redirect.to_string()),
        }
    }

    /// The canned reply to send instead of calling the model, if blocked.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect_text.as_deref()
    }
}

/// Outcome of the post-filter for one model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilterReport {
    pub passed: bool,
    /// Every detected problem, in detection order.
    pub issues: Vec<String>,
    /// The replacement reply; set only when `passed` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_response: Option<String>,
}

impl PostFilterReport {
    /// Build a report from the collected issues.
    pub fn from_issues(issues: Vec<String>) -> Self {
        if issues.is_empty() {
            Self {
                passed: true,
                issues,
                corrected_response: None,
            }
        } else {
            Self {
                passed: false,
                issues,
                corrected_response: Some(TOPIC_REDIRECT.to_string()),
            }
        }
    }
}
