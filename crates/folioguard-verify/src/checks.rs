//! Built-in domain checks, one per verifiable tool result.
//!
//! Each check receives the `result` object of a successful tool call. Field
//! access is lenient: a numeric field may be a JSON number or a numeric
//! string, and a missing field reads as zero.

use std::collections::HashSet;

use serde_json::Value;

use folioguard_contracts::verify::VerificationCheck;

use crate::symbols::unknown_symbols;

pub const ALLOCATION_SUM: &str = "allocation_sum";
pub const VALID_MARKET_PRICES: &str = "valid_market_prices";
pub const TAX_DATA_CONSISTENCY: &str = "tax_data_consistency";
pub const NO_HALLUCINATED_SYMBOLS: &str = "no_hallucinated_symbols";
pub const PERFORMANCE_DATA_VALID: &str = "performance_data_valid";
pub const DIVIDEND_DATA_VALID: &str = "dividend_data_valid";
pub const REPORT_STRUCTURE_VALID: &str = "report_structure_valid";
pub const ACCOUNT_DATA_VALID: &str = "account_data_valid";
pub const TIMELINE_DATA_VALID: &str = "timeline_data_valid";

// ── Field helpers ────────────────────────────────────────────────────────────

/// Resolve a dot-notation path (e.g. `"taxEstimate.totals.costBasis"`).
/// Returns `None` when any segment is missing or the value is JSON `null`.
pub fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(v) if !v.is_null() => current = v,
            _ => return None,
        }
    }
    Some(current)
}

/// A number, or a string that parses as one.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// The numeric value at `path`, zero when missing or not numeric.
fn number_at(value: &Value, path: &str) -> f64 {
    resolve_path(value, path).and_then(as_number).unwrap_or(0.0)
}

fn array_at<'v>(value: &'v Value, path: &str) -> &'v [Value] {
    resolve_path(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A count field, falling back to the length of a companion array.
fn count_at(value: &Value, count_path: &str, array_path: &str) -> f64 {
    match resolve_path(value, count_path).and_then(as_number) {
        Some(count) => count,
        None => array_at(value, array_path).len() as f64,
    }
}

fn holdings(result: &Value) -> &[Value] {
    array_at(result, "holdings")
}

// ── portfolio_summary ────────────────────────────────────────────────────────

/// Holding allocations must sum to strictly between 95% and 105%.
pub fn allocation_sum(result: &Value) -> VerificationCheck {
    let total: f64 = holdings(result)
        .iter()
        .map(|h| number_at(h, "allocationInPercentage"))
        .sum();
    VerificationCheck::new(
        ALLOCATION_SUM,
        total > 95.0 && total < 105.0,
        format!("Portfolio allocations sum to {:.1}% (expected ~100%)", total),
    )
}

/// Every holding must carry a market price above zero.
pub fn valid_market_prices(result: &Value) -> VerificationCheck {
    let invalid: Vec<&str> = holdings(result)
        .iter()
        .filter(|h| {
            !resolve_path(h, "marketPrice")
                .and_then(as_number)
                .is_some_and(|price| price > 0.0)
        })
        .map(|h| h.get("symbol").and_then(Value::as_str).unwrap_or("?"))
        .collect();

    if invalid.is_empty() {
        VerificationCheck::new(VALID_MARKET_PRICES, true, "All holdings have valid market prices")
    } else {
        VerificationCheck::new(
            VALID_MARKET_PRICES,
            false,
            format!(
                "{} holdings have invalid prices: {}",
                invalid.len(),
                invalid.join(", ")
            ),
        )
    }
}

/// Uppercase tokens in the response must be held symbols or known terms.
pub fn no_hallucinated_symbols(result: &Value, response_text: &str) -> VerificationCheck {
    let known: HashSet<&str> = holdings(result)
        .iter()
        .filter_map(|h| h.get("symbol").and_then(Value::as_str))
        .collect();
    let suspects = unknown_symbols(response_text, &known);

    if suspects.is_empty() {
        VerificationCheck::new(
            NO_HALLUCINATED_SYMBOLS,
            true,
            "All mentioned symbols are in the portfolio or are known terms",
        )
    } else {
        let listed: Vec<&str> = suspects.iter().map(String::as_str).collect();
        VerificationCheck::new(
            NO_HALLUCINATED_SYMBOLS,
            false,
            format!("Potentially unknown symbols mentioned: {}", listed.join(", ")),
        )
    }
}

// ── tax_estimate ─────────────────────────────────────────────────────────────

pub fn tax_data_consistency(result: &Value) -> VerificationCheck {
    let cost_basis = number_at(result, "taxEstimate.totals.costBasis");
    let current_value = number_at(result, "taxEstimate.totals.currentValue");
    VerificationCheck::new(
        TAX_DATA_CONSISTENCY,
        cost_basis > 0.0 && current_value > 0.0,
        format!(
            "Cost basis: ${:.2}, Current value: ${:.2}",
            cost_basis, current_value
        ),
    )
}

// ── Other tools ──────────────────────────────────────────────────────────────

pub fn performance_data_valid(result: &Value) -> VerificationCheck {
    let has_net_performance = resolve_path(result, "performance.netPerformance").is_some();
    let has_net_worth = resolve_path(result, "performance.currentNetWorth").is_some();
    let data_points = number_at(result, "chartSummary.dataPoints");

    let passed = has_net_performance || has_net_worth || data_points > 0.0;
    let detail = if passed {
        format!(
            "Performance data present (netPerformance: {}, currentNetWorth: {}, chart points: {})",
            has_net_performance, has_net_worth, data_points
        )
    } else {
        "No performance figures or chart data returned".to_string()
    };
    VerificationCheck::new(PERFORMANCE_DATA_VALID, passed, detail)
}

pub fn dividend_data_valid(result: &Value) -> VerificationCheck {
    let income = number_at(result, "totalDividendIncome");
    VerificationCheck::new(
        DIVIDEND_DATA_VALID,
        income >= 0.0,
        format!("Total dividend income: ${:.2}", income),
    )
}

pub fn report_structure_valid(result: &Value) -> VerificationCheck {
    let categories = array_at(result, "categories").len();
    if categories > 0 {
        VerificationCheck::new(
            REPORT_STRUCTURE_VALID,
            true,
            format!("Report contains {} categories", categories),
        )
    } else {
        VerificationCheck::new(REPORT_STRUCTURE_VALID, false, "Report returned no categories")
    }
}

pub fn account_data_valid(result: &Value) -> VerificationCheck {
    let accounts = count_at(result, "totalCount", "accounts");
    if accounts > 0.0 {
        VerificationCheck::new(
            ACCOUNT_DATA_VALID,
            true,
            format!("{} accounts returned", accounts),
        )
    } else {
        VerificationCheck::new(ACCOUNT_DATA_VALID, false, "No accounts returned")
    }
}

pub fn timeline_data_valid(result: &Value) -> VerificationCheck {
    let periods = count_at(result, "periodCount", "investments");
    if periods > 0.0 {
        VerificationCheck::new(
            TIMELINE_DATA_VALID,
            true,
            format!("{} investment periods returned", periods),
        )
    } else {
        VerificationCheck::new(TIMELINE_DATA_VALID, false, "No investment periods returned")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn make_holding(symbol: &str, allocation: f64, price: Value) -> Value {
        json!({
            "symbol": symbol,
            "allocationInPercentage": allocation,
            "marketPrice": price,
        })
    }

    #[test]
    fn allocation_sum_tolerance_band() {
        let ok = json!({ "holdings": [
            make_holding("AAPL", 60.2, json!(190.0)),
            make_holding("MSFT", 39.9, json!(410.0)),
        ]});
        assert!(allocation_sum(&ok).passed);

        let over = json!({ "holdings": [
            make_holding("AAPL", 70.0, json!(190.0)),
            make_holding("MSFT", 70.0, json!(410.0)),
        ]});
        let check = allocation_sum(&over);
        assert!(!check.passed);
        assert_eq!(check.detail, "Portfolio allocations sum to 140.0% (expected ~100%)");

        // The band is open: exactly 95 and 105 fail.
        let edge = json!({ "holdings": [make_holding("AAPL", 95.0, json!(1.0))] });
        assert!(!allocation_sum(&edge).passed);
    }

    #[test]
    fn allocation_accepts_numeric_strings() {
        let result = json!({ "holdings": [
            { "symbol": "VTI", "allocationInPercentage": "100.0", "marketPrice": 250 },
        ]});
        assert!(allocation_sum(&result).passed);
    }

    #[test]
    fn zero_and_missing_prices_are_named() {
        let result = json!({ "holdings": [
            make_holding("AAPL", 50.0, json!(0)),
            make_holding("MSFT", 30.0, json!(410.0)),
            make_holding("TSLA", 20.0, Value::Null),
            { "allocationInPercentage": 0.0, "marketPrice": -1 },
        ]});
        let check = valid_market_prices(&result);
        assert!(!check.passed);
        assert_eq!(check.detail, "3 holdings have invalid prices: AAPL, TSLA, ?");
    }

    #[test]
    fn tax_consistency_requires_both_totals() {
        let ok = json!({ "taxEstimate": { "totals": { "costBasis": 5000.0, "currentValue": 6200.5 } } });
        let check = tax_data_consistency(&ok);
        assert!(check.passed);
        assert_eq!(check.detail, "Cost basis: $5000.00, Current value: $6200.50");

        let zero_value =
            json!({ "taxEstimate": { "totals": { "costBasis": "5000.00", "currentValue": "0" } } });
        assert!(!tax_data_consistency(&zero_value).passed);

        assert!(!tax_data_consistency(&json!({})).passed);
    }

    #[test]
    fn performance_accepts_any_signal() {
        assert!(performance_data_valid(&json!({ "performance": { "netPerformance": -120.0 } })).passed);
        assert!(performance_data_valid(&json!({ "performance": { "currentNetWorth": 10000.0 } })).passed);
        assert!(
            performance_data_valid(&json!({ "performance": {}, "chartSummary": { "dataPoints": 30 } }))
                .passed
        );
        assert!(
            !performance_data_valid(&json!({ "performance": {}, "chartSummary": {} })).passed
        );
        assert!(
            !performance_data_valid(&json!({ "performance": { "netPerformance": null } })).passed
        );
    }

    #[test]
    fn dividend_income_must_not_be_negative() {
        assert!(dividend_data_valid(&json!({ "totalDividendIncome": 412.3 })).passed);
        assert!(dividend_data_valid(&json!({ "totalDividendIncome": 0 })).passed);
        assert!(!dividend_data_valid(&json!({ "totalDividendIncome": -5 })).passed);
    }

    #[test]
    fn report_needs_categories() {
        assert!(report_structure_valid(&json!({ "categories": [{ "key": "fees" }] })).passed);
        assert!(!report_structure_valid(&json!({ "categories": [] })).passed);
        assert!(!report_structure_valid(&json!({})).passed);
    }

    #[test]
    fn account_count_falls_back_to_array_length() {
        assert!(account_data_valid(&json!({ "totalCount": 2 })).passed);
        assert!(account_data_valid(&json!({ "accounts": [{ "name": "Brokerage" }] })).passed);
        assert!(!account_data_valid(&json!({ "totalCount": 0, "accounts": [] })).passed);
    }

    #[test]
    fn timeline_count_falls_back_to_array_length() {
        assert!(timeline_data_valid(&json!({ "periodCount": 12 })).passed);
        assert!(timeline_data_valid(&json!({ "investments": [{ "date": "2025-01" }] })).passed);
        assert!(!timeline_data_valid(&json!({ "investments": [] })).passed);
    }

    #[test]
    fn resolve_path_treats_null_as_missing() {
        let value = json!({ "a": { "b": null, "c": 1 } });
        assert!(resolve_path(&value, "a.b").is_none());
        assert_eq!(resolve_path(&value, "a.c"), Some(&json!(1)));
        assert!(resolve_path(&value, "a.d.e").is_none());
    }
}
