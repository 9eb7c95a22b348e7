//! Fact-lock verification: a conservative lexical guard over generated text.
//!
//! Generated copy may only reuse multi-word capitalized phrases and
//! "Month YYYY" date tokens that already appear in the source resume's
//! plain-text serialization. Binary accept/reject; rejection sends the
//! caller to its deterministic fallback.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::Resume;
use crate::resume::plaintext::{resume_to_plain_text, PlainTextOptions};
use crate::text::{dedupe, MONTH_PATTERN};

static CAPITAL_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").unwrap());
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b{MONTH_PATTERN}\s+\d{{4}}\b")).unwrap());

/// Sequences of two or more consecutive capitalized words, deduplicated in
/// order of first appearance.
pub fn extract_capital_phrases(text: &str) -> Vec<String> {
    dedupe(
        CAPITAL_PHRASE
            .find_iter(text)
            .map(|found| found.as_str().to_string())
            .collect(),
    )
}

/// Lowercased "Month YYYY" tokens, deduplicated in order of first appearance.
pub fn extract_date_tokens(text: &str) -> Vec<String> {
    dedupe(
        DATE_TOKEN
            .find_iter(text)
            .map(|found| found.as_str().to_lowercase())
            .collect(),
    )
}

/// Accepts `candidate` only if it introduces no capitalized phrase and no
/// date token absent from the original resume's plain-text serialization.
pub fn fact_lock_check(original: &Resume, candidate: &str) -> bool {
    let original_text =
        resume_to_plain_text(original, &PlainTextOptions::default()).to_lowercase();

    let introduces_phrase = extract_capital_phrases(candidate)
        .iter()
        .any(|phrase| !original_text.contains(&phrase.to_lowercase()));
    if introduces_phrase {
        return false;
    }

    let original_dates = extract_date_tokens(&original_text);
    let introduces_date = extract_date_tokens(candidate)
        .iter()
        .any(|token| !original_dates.contains(token));
    !introduces_date
}
