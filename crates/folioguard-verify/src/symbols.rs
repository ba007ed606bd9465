//! Ticker-hallucination heuristic.
//!
//! Any 2-5 letter uppercase token in a response that is neither a held symbol
//! nor a known term is reported as a possibly fabricated ticker.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static TICKER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("ticker token pattern must compile"));

/// Uppercase tokens that are not tickers: common English words, currencies,
/// units and financial acronyms.
pub static KNOWN_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // english
        "AN", "THE", "AND", "OR", "NOT", "IS", "IT", "IN", "ON", "TO",
        "FOR", "OF", "AT", "BY", "AS", "IF", "SO", "DO", "BE", "HAS", "HAD",
        "WAS", "ARE", "BUT", "ALL", "CAN", "HER", "HIS", "ITS", "MAY", "NEW",
        "NOW", "OLD", "SEE", "WAY", "WHO", "DID", "GET", "LET", "SAY", "SHE",
        "TOO", "USE", "YOUR", "WITH", "THAT", "THIS", "FROM", "HAVE", "BEEN",
        "WILL", "EACH", "THAN", "THEM", "SOME", "MOST", "VERY", "JUST", "OVER",
        "NO", "YES", "MY", "WE", "US", "UP", "YOU", "OUR", "ONLY", "NOTE",
        "HIGH", "LOW", "TOTAL", "OK", "AM", "PM",
        // places and tech
        "USA", "UK", "EU", "FAQ", "API", "CSV", "PDF", "AI", "ID",
        // currencies
        "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "CNY", "HKD", "INR",
        // instruments and accounts
        "ETF", "ETFS", "ETN", "REIT", "IRA", "HSA", "CD", "OTC", "IPO", "ADR",
        // metrics
        "ROI", "YTD", "MTD", "QTD", "YOY", "QOQ", "EPS", "PE", "NAV", "APY",
        "APR", "AUM", "CAGR", "IRR", "NPV", "TWR", "MWR", "BPS", "PNL", "DCA",
        "FIFO", "LIFO", "DRIP", "EBIT", "ESG", "ATH",
        // institutions and macro
        "SEC", "IRS", "FDIC", "NYSE", "FED", "FOMC", "GDP", "CPI", "FX",
        "CEO", "CFO", "CTO", "LLC", "INC", "CORP", "LTD",
        // trade actions
        "BUY", "SELL", "HOLD",
    ]
    .into_iter()
    .collect()
});

/// Tokens in `response_text` that look like tickers but are neither held
/// (`known_symbols`) nor known terms. Sorted and de-duplicated.
pub fn unknown_symbols(response_text: &str, known_symbols: &HashSet<&str>) -> BTreeSet<String> {
    TICKER_TOKEN
        .find_iter(response_text)
        .map(|m| m.as_str())
        .filter(|token| !KNOWN_TERMS.contains(token) && !known_symbols.contains(token))
        .map(str::to_string)
        .collect()
}
