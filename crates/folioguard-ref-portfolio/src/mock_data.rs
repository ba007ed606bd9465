//! Simulated portfolio backend data for the FolioGuard reference runtime.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. Each function returns the JSON a portfolio backend tool would
//! produce, including the `success` flag the verifier branches on.

use serde_json::{json, Value};

// ── Holdings ──────────────────────────────────────────────────────────────────

/// Five holdings whose allocations sum to exactly 100%.
pub fn portfolio_summary() -> Value {
    json!({
        "success": true,
        "baseCurrency": "USD",
        "totalValue": 48210.55,
        "holdings": [
            { "symbol": "AAPL",  "name": "Apple Inc.",            "quantity": 76,  "marketPrice": 190.31, "allocationInPercentage": 30.0, "assetClass": "EQUITY" },
            { "symbol": "MSFT",  "name": "Microsoft Corp.",       "quantity": 29,  "marketPrice": 415.60, "allocationInPercentage": 25.0, "assetClass": "EQUITY" },
            { "symbol": "GOOGL", "name": "Alphabet Inc.",         "quantity": 56,  "marketPrice": 172.18, "allocationInPercentage": 20.0, "assetClass": "EQUITY" },
            { "symbol": "NVDA",  "name": "NVIDIA Corp.",          "quantity": 8,   "marketPrice": 903.95, "allocationInPercentage": 15.0, "assetClass": "EQUITY" },
            { "symbol": "VTI",   "name": "Vanguard Total Market", "quantity": 18,  "marketPrice": 267.84, "allocationInPercentage": 10.0, "assetClass": "ETF" }
        ]
    })
}

// ── Tax ───────────────────────────────────────────────────────────────────────

pub fn tax_estimate() -> Value {
    json!({
        "success": true,
        "taxEstimate": {
            "year": 2025,
            "totals": {
                "costBasis": 38340.15,
                "currentValue": 48210.55,
                "unrealizedGain": 9870.40,
                "estimatedTax": 1480.56
            },
            "shortTermGain": 1210.00,
            "longTermGain": 8660.40
        }
    })
}

// ── Performance ───────────────────────────────────────────────────────────────

pub fn portfolio_performance(range: &str) -> Value {
    json!({
        "success": true,
        "range": range,
        "performance": {
            "currentNetWorth": 48210.55,
            "totalInvestment": 38340.15,
            "netPerformance": 9870.40,
            "netPerformancePercentage": 0.2574
        },
        "chartSummary": {
            "dataPoints": 52,
            "startValue": 41020.00,
            "endValue": 48210.55
        }
    })
}

// ── Income, reports, accounts, timeline ──────────────────────────────────────

pub fn dividend_history() -> Value {
    json!({
        "success": true,
        "totalDividendIncome": 412.37,
        "dividends": [
            { "symbol": "AAPL", "date": "2025-02-13", "amount": 19.00 },
            { "symbol": "MSFT", "date": "2025-03-13", "amount": 24.07 },
            { "symbol": "VTI",  "date": "2025-03-26", "amount": 16.20 }
        ]
    })
}

pub fn portfolio_report() -> Value {
    json!({
        "success": true,
        "categories": [
            { "key": "fees",            "rulesActive": 1, "rulesFulfilled": 1 },
            { "key": "currencyRisk",    "rulesActive": 2, "rulesFulfilled": 2 },
            { "key": "accountClusterRisk", "rulesActive": 2, "rulesFulfilled": 1 }
        ]
    })
}

pub fn account_overview() -> Value {
    json!({
        "success": true,
        "totalCount": 2,
        "accounts": [
            { "name": "Brokerage", "platform": "Example Broker", "balance": 1250.00, "currency": "USD" },
            { "name": "Roth IRA",  "platform": "Example Broker", "balance": 310.75,  "currency": "USD" }
        ]
    })
}

pub fn investment_timeline() -> Value {
    json!({
        "success": true,
        "periodCount": 4,
        "investments": [
            { "date": "2024-Q2", "investment": 9500.00 },
            { "date": "2024-Q3", "investment": 10100.00 },
            { "date": "2024-Q4", "investment": 8740.15 },
            { "date": "2025-Q1", "investment": 10000.00 }
        ]
    })
}

/// A quote for `symbol`. Not covered by any built-in verification check.
pub fn market_data(symbol: &str) -> Value {
    let price = match symbol {
        "AAPL" => 190.31,
        "MSFT" => 415.60,
        "GOOGL" => 172.18,
        "NVDA" => 903.95,
        "VTI" => 267.84,
        _ => {
            return json!({
                "success": false,
                "error": format!("No quote available for {}", symbol)
            })
        }
    };
    json!({ "success": true, "symbol": symbol, "marketPrice": price, "currency": "USD" })
}
