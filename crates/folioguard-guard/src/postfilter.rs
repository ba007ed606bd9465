//! Post-filter: screens a model response before the user sees it.
//!
//! Every check runs; all issues are recorded even though a single fixed
//! correction replaces the response.

use tracing::{debug, warn};

use folioguard_contracts::filter::PostFilterReport;

use crate::config::Limits;
use crate::normalize::normalize_unicode;
use crate::patterns::{
    mentions_financial_keyword, CREATIVE_COMPLIANCE, CREATIVE_REQUEST, CREDENTIAL_LEAK,
    HARMFUL_ADVICE, OFF_TOPIC_CONTENT, PERSONA_ARTIFACT, PIRATE_TONE, SYSTEM_PROMPT_LEAK,
    UNGRACEFUL_FALLBACKS,
};

/// Run the post-filter over `response_text` produced for `user_message`.
pub fn evaluate(response_text: &str, user_message: &str, limits: &Limits) -> PostFilterReport {
    let response = normalize_unicode(response_text);
    let response_lower = response.to_lowercase();
    let question_lower = normalize_unicode(user_message).to_lowercase();
    let financial_question = mentions_financial_keyword(&question_lower);

    let mut issues = Vec::new();

    // ── Leakage and advice: first match per category ─────────────────────────
    if let Some(pattern) = SYSTEM_PROMPT_LEAK.first_match(&response_lower) {
        issues.push(format!(
            "System prompt leakage detected: pattern '{}' found in response",
            pattern
        ));
    }

    // Tokens are case-sensitive; scan the case-preserved text.
    if let Some(pattern) = CREDENTIAL_LEAK.first_match(&response) {
        issues.push(format!(
            "Credential leakage detected: pattern '{}' matched in response",
            pattern
        ));
    }

    if let Some(pattern) = HARMFUL_ADVICE.first_match(&response_lower) {
        issues.push(format!(
            "Harmful financial advice detected: pattern '{}' matched",
            pattern
        ));
    }

    if !financial_question {
        if let Some(pattern) = OFF_TOPIC_CONTENT.first_match(&response_lower) {
            issues.push(format!(
                "Off-topic content detected: pattern '{}' matched in response",
                pattern
            ));
        }
    }

    let length = response_text.chars().count();
    if length > limits.max_response_length {
        issues.push(format!(
            "Response length anomaly: {} chars exceeds {} limit",
            length, limits.max_response_length
        ));
    }

    // ── Tone and persona: every indicator ────────────────────────────────────
    for indicator in PIRATE_TONE.all_matches(&response_lower) {
        issues.push(format!("Tone violation: pirate language detected ('{}')", indicator));
    }

    for indicator in PERSONA_ARTIFACT.all_matches(&response_lower) {
        issues.push(format!("Persona violation: '{}' detected", indicator));
    }

    if CREATIVE_REQUEST.is_match(&question_lower) {
        for indicator in CREATIVE_COMPLIANCE.all_matches(&response_lower) {
            issues.push(format!(
                "Off-topic compliance: creative writing detected ('{}')",
                indicator
            ));
        }
    }

    if !financial_question {
        for phrase in UNGRACEFUL_FALLBACKS {
            if response_lower.contains(phrase) {
                issues.push(format!(
                    "Ungraceful fallback: '{}' used for off-topic question",
                    phrase
                ));
            }
        }
    }

    if issues.is_empty() {
        debug!(length, "post-filter: passed");
    } else {
        warn!(issues = issues.len(), length, "post-filter: response flagged");
    }
    PostFilterReport::from_issues(issues)
}
