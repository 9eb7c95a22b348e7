//! Job-description keyword extraction: tokens, adjacent bigrams, and
//! dictionary matches against a common-skills list, deduplicated in
//! insertion order and capped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::text::{dedupe, normalize_text};

/// Hard cap on the extracted keyword list.
const MAX_KEYWORDS: usize = 40;

/// Characters other than `+ . # -` and alphanumerics become spaces before
/// tokenization, preserving tokens like "c++" and "node.js".
static NON_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9+.#\s-]").unwrap());

static REQUIREMENT_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(responsibilities|requirements|qualifications)\s*:?\s*$").unwrap()
});
static JD_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[•*]\s+").unwrap());
static MULTI_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

pub static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "the", "to", "of", "in", "on", "at", "for", "with", "from", "into",
        "over", "under", "about", "as", "is", "are", "was", "were", "be", "been", "being", "by",
        "or", "nor", "not", "but", "so", "if", "than", "then", "that", "this", "these", "those",
        "it", "its", "we", "our", "ours", "you", "your", "yours", "they", "their", "them", "he",
        "she", "his", "her", "will", "would", "can", "could", "should", "shall", "might", "must",
        "do", "does", "did", "have", "has", "had", "what", "which", "who", "whom", "how", "when",
        "where", "why", "while", "all", "any", "both", "each", "few", "more", "most", "other",
        "some", "such", "only", "own", "same", "very", "per", "via", "etc", "also", "well",
        "able", "across", "within", "during", "including", "looking", "join", "plus", "ideal",
        "strong", "years", "ability", "etc.",
    ]
    .into_iter()
    .collect()
});

/// Lowercase skill dictionary matched as substrings of the normalized JD.
pub const COMMON_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "golang",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "sql",
    "nosql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "next.js",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "rails",
    ".net",
    "graphql",
    "rest",
    "grpc",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "git",
    "ci/cd",
    "linux",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "kafka",
    "rabbitmq",
    "spark",
    "hadoop",
    "snowflake",
    "airflow",
    "pandas",
    "numpy",
    "pytorch",
    "tensorflow",
    "machine learning",
    "deep learning",
    "data analysis",
    "data engineering",
    "etl",
    "tableau",
    "power bi",
    "figma",
    "jira",
    "agile",
    "scrum",
    "microservices",
    "distributed systems",
    "system design",
    "unit testing",
    "tdd",
    "oauth",
    "devops",
    "sre",
    "observability",
    "prometheus",
    "grafana",
];

/// Strips JD boilerplate before extraction: requirement-style headings go
/// away, bullet glyphs collapse to `-`, whitespace runs collapse to one
/// space.
pub fn normalize_job_description(text: &str) -> String {
    let base = normalize_text(text);
    let base = MULTI_NEWLINE.replace_all(&base, "\n\n");
    let base = REQUIREMENT_HEADING.replace_all(&base, "");
    let base = JD_BULLET.replace_all(&base, "- ");
    let base = MULTI_WS.replace_all(&base, " ");
    base.trim().to_string()
}

/// Extracts up to 40 ranked keywords/phrases from a job description:
/// single tokens, adjacent bigrams, then dictionary skill matches, deduped
/// preserving first occurrence.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = normalize_job_description(text).to_lowercase();

    let cleaned = NON_TOKEN.replace_all(&normalized, " ");
    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect();

    // Bigrams come from the unstripped word stream so multi-word phrases
    // keep their punctuation.
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut phrases: Vec<String> = Vec::new();
    for pair in words.windows(2) {
        let phrase = format!("{} {}", pair[0], pair[1]);
        if phrase.len() > 4 && !STOPWORDS.contains(pair[0]) {
            phrases.push(phrase);
        }
    }

    let skill_matches: Vec<String> = COMMON_SKILLS
        .iter()
        .filter(|skill| normalized.contains(**skill))
        .map(|skill| skill.to_string())
        .collect();

    let mut combined = tokens;
    combined.extend(phrases);
    combined.extend(skill_matches);

    let mut keywords = dedupe(combined);
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
