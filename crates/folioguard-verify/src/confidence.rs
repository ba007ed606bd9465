//! Confidence scoring.
//!
//! Four independent 0-100 factors blended with fixed weights. All arithmetic
//! is integer and truncating, so the score is biased low.

use folioguard_contracts::{
    tool::ToolResult,
    verify::{ConfidenceFactors, ConfidenceScore, VerificationCheck},
};

const TOOL_SUCCESS_WEIGHT: u32 = 30;
const CHECK_PASS_WEIGHT: u32 = 30;
const RESPONSE_QUALITY_WEIGHT: u32 = 20;
const DATA_BACKED_WEIGHT: u32 = 20;

const HEDGING_PHRASES: &[&str] = &["i'm not sure", "i cannot", "unavailable", "no data"];

/// Score a turn from its tool results, checks and final response text.
pub fn score(
    tool_results: &[ToolResult],
    checks: &[VerificationCheck],
    response_text: &str,
) -> ConfidenceScore {
    let succeeded = tool_results.iter().filter(|r| r.succeeded()).count();

    let factors = ConfidenceFactors {
        tool_success: percentage(succeeded, tool_results.len()).unwrap_or(50),
        check_pass_rate: percentage(checks.iter().filter(|c| c.passed).count(), checks.len())
            .unwrap_or(100),
        response_quality: response_quality(response_text),
        data_backed: data_backed(tool_results.len(), succeeded),
    };

    let weighted = TOOL_SUCCESS_WEIGHT * u32::from(factors.tool_success)
        + CHECK_PASS_WEIGHT * u32::from(factors.check_pass_rate)
        + RESPONSE_QUALITY_WEIGHT * u32::from(factors.response_quality)
        + DATA_BACKED_WEIGHT * u32::from(factors.data_backed);

    ConfidenceScore {
        overall: clamp_percent(weighted / 100),
        factors,
    }
}

/// Truncated `part / whole` as a percentage; `None` when `whole` is zero.
fn percentage(part: usize, whole: usize) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    Some(clamp_percent((part * 100 / whole) as u32))
}

fn response_quality(response_text: &str) -> u8 {
    let base: u8 = match response_text.chars().count() {
        0..=19 => 20,
        20..=99 => 60,
        _ => 90,
    };
    let lowered = response_text.to_lowercase();
    if HEDGING_PHRASES.iter().any(|p| lowered.contains(p)) {
        base.saturating_sub(20).max(10)
    } else {
        base
    }
}

fn data_backed(tool_count: usize, succeeded: usize) -> u8 {
    match (tool_count, succeeded) {
        (0, _) => 40,
        (_, 0) => 30,
        _ => 100,
    }
}

fn clamp_percent(value: u32) -> u8 {
    value.min(100) as u8
}
