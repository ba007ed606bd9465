//! Portfolio reference runtime demo scenarios.
//!
//! Each scenario is a self-contained module that wires up real FolioGuard
//! components (guardrail engine, response checker, turn runner) with a
//! scripted model and mock portfolio tools, and demonstrates a distinct
//! guardrail outcome.

pub mod grounded_summary;
pub mod profanity;
pub mod prompt_injection;
pub mod tone_hijack;

use folioguard_contracts::turn::TurnResponse;

/// Shorten `text` to at most `max` characters for display.
pub(crate) fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Print the filter and verification summary of a finished turn.
pub(crate) fn print_turn(response: &TurnResponse) {
    println!(
        "  Pre-filter:             {} ({:?})",
        if response.was_blocked() { "BLOCKED" } else { "ALLOWED" },
        response.pre_filter.reason
    );
    match &response.post_filter {
        Some(report) if report.passed => println!("  Post-filter:            PASS"),
        Some(report) => {
            println!("  Post-filter:            CORRECTED ({} issue(s))", report.issues.len());
            for issue in &report.issues {
                println!("    - {}", issue);
            }
        }
        None => println!("  Post-filter:            SKIPPED (model not called)"),
    }
    println!("  Tool calls:             {}", response.tool_calls.len());
    for check in &response.verification.checks {
        println!(
            "    [{}] {:<24} {}",
            if check.passed { "PASS" } else { "FAIL" },
            check.check_id,
            check.detail
        );
    }
    println!(
        "  Verification result:    {} (confidence {})",
        if response.verification.verified { "VERIFIED" } else { "FAILED" },
        response.verification.confidence.overall
    );
    println!("  Reply:                  {}", preview(&response.message, 120));
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }
}
