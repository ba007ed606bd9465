//! Verification report and confidence types.
//!
//! A `VerificationOutcome` is derived purely from the tool results and the
//! final response text of one turn. It is recomputed every turn and never
//! stored by this workspace.

use serde::{Deserialize, Serialize};

/// One deterministic domain-consistency assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCheck {
    /// Stable identifier, e.g. "allocation_sum".
    #[serde(rename = "check")]
    pub check_id: String,
    pub passed: bool,
    /// Human-readable explanation, naming offenders on failure.
    pub detail: String,
}

impl VerificationCheck {
    pub fn new(check_id: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            passed,
            detail: detail.into(),
        }
    }
}

/// The four independently computed confidence inputs, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactors {
    pub tool_success: u8,
    pub check_pass_rate: u8,
    pub response_quality: u8,
    pub data_backed: u8,
}

/// Blended trust estimate for a turn. Not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Weighted blend of `factors`, truncated to an integer in 0-100.
    pub overall: u8,
    pub factors: ConfidenceFactors,
}

/// The full verification result for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// True when there are no checks, or every check passed.
    pub verified: bool,
    pub checks: Vec<VerificationCheck>,
    pub confidence: ConfidenceScore,
}

impl VerificationOutcome {
    /// Look up a check by identifier.
    pub fn check(&self, check_id: &str) -> Option<&VerificationCheck> {
        self.checks.iter().find(|c| c.check_id == check_id)
    }

    /// All checks that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}
