//! Base64 payload detection.
//!
//! Runs of base64-looking text are decoded and searched for injection
//! keywords. A run that does not decode is not a payload.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine as _,
};
use once_cell::sync::Lazy;

use crate::patterns::{BASE64_RUN, DECODED_INJECTION_KEYWORDS};

/// Standard alphabet, padding optional, trailing bits tolerated.
static LENIENT: Lazy<GeneralPurpose> = Lazy::new(|| {
    GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new()
            .with_decode_padding_mode(DecodePaddingMode::RequireNone)
            .with_decode_allow_trailing_bits(true),
    )
});

/// Outcome of decoding one base64-looking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base64Run {
    /// Decoded text contains `keyword`.
    Injection { keyword: &'static str },
    /// Decoded cleanly, no injection keyword.
    Clean,
    /// Not valid base64; skipped.
    Undecodable,
}

/// Decode one run and classify it.
pub fn classify_run(run: &str) -> Base64Run {
    let data = run.trim_end_matches('=');
    // A single leftover sextet cannot encode a byte.
    if data.len() % 4 == 1 {
        return Base64Run::Undecodable;
    }

    let bytes = match LENIENT.decode(data) {
        Ok(bytes) => bytes,
        Err(_) => return Base64Run::Undecodable,
    };
    // Invalid bytes are dropped, not replaced, so a stray 0xFF cannot split
    // a keyword.
    let decoded = bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid())
        .collect::<String>()
        .to_lowercase();

    DECODED_INJECTION_KEYWORDS
        .iter()
        .find(|kw| decoded.contains(*kw))
        .map(|keyword| Base64Run::Injection { keyword })
        .unwrap_or(Base64Run::Clean)
}

/// Classify every candidate run in `text`; return the first injection keyword
/// found.
pub fn detect_base64_payload(text: &str) -> Option<&'static str> {
    BASE64_RUN
        .find_iter(text)
        .find_map(|m| match classify_run(m.as_str()) {
            Base64Run::Injection { keyword } => Some(keyword),
            Base64Run::Clean | Base64Run::Undecodable => None,
        })
}
