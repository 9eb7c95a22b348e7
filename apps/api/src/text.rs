//! Text normalization primitives shared by every parsing and scoring stage.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static BULLET_GLYPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•]\s+").unwrap());
static NUMBERED_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// Month-name alternation used by the date heuristics (3-letter abbreviations,
/// `sept`, and full month names).
pub const MONTH_PATTERN: &str = "(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may\
|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Canonicalizes whitespace: CRLF to LF, runs of horizontal whitespace to a
/// single space, three or more newlines to exactly one blank line, trimmed.
/// Total and idempotent.
pub fn normalize_text(value: &str) -> String {
    let unified = value.replace("\r\n", "\n");
    let collapsed = HORIZONTAL_WS.replace_all(&unified, " ");
    EXCESS_NEWLINES
        .replace_all(&collapsed, "\n\n")
        .trim()
        .to_string()
}

/// Normalized, trimmed, non-empty lines of `value`.
pub fn to_lines(value: &str) -> Vec<String> {
    normalize_text(value)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes duplicates while preserving the first occurrence of each item.
pub fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// A line starting with a bullet glyph (`-`, `*`, `•`) or `N.` numbering.
pub fn is_bullet(line: &str) -> bool {
    BULLET_GLYPH.is_match(line) || NUMBERED_BULLET.is_match(line)
}

/// Strips a leading bullet glyph, then leading `N.` numbering.
pub fn strip_bullet(line: &str) -> String {
    let stripped = BULLET_GLYPH.replace(line, "");
    NUMBERED_BULLET.replace(&stripped, "").to_string()
}
