//! Rule-based ATS formatting scan: four independently-penalized rubric
//! values weighted into a single 0-100 score with an issue list and quick
//! wins.
//!
//! Only the final weighted score is floored at zero; rubric sub-scores carry
//! whatever the stacked penalties produce. Callers rely on that exact
//! arithmetic.

pub mod handlers;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::resume::parser::CANONICAL_HEADINGS;
use crate::text::MONTH_PATTERN;

static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•]\s+").unwrap());
static TABLE_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t|\s{4,}").unwrap());
static MONTH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b{MONTH_PATTERN}\b")).unwrap());

const MIN_TEXT_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub fix: String,
}

/// Rubric sub-scores. Signed on purpose: stacked penalties are not floored
/// here, only the final weighted score is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    pub layout: i32,
    pub parseability: i32,
    pub readability: i32,
    pub file_quality: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    pub score: u32,
    pub rating: Rating,
    pub rubric: Rubric,
    pub issues: Vec<Issue>,
    pub quick_wins: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtsFileMeta {
    pub is_scanned: bool,
    pub text_length: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreInput {
    pub raw_text: String,
    #[serde(default)]
    pub file_meta: Option<AtsFileMeta>,
}

/// Scans raw resume text for formatting anti-patterns. Total over any input.
pub fn score_ats_format(input: &AtsScoreInput) -> AtsScore {
    let text = input.raw_text.as_str();
    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();
    let normalized = text.to_lowercase();

    let mut issues: Vec<Issue> = Vec::new();
    let mut quick_wins: Vec<String> = Vec::new();

    // Layout: section headings present, one bullet style.
    let missing_headings: Vec<&str> = CANONICAL_HEADINGS
        .iter()
        .filter(|heading| !normalized.contains(&heading.to_lowercase()))
        .copied()
        .collect();

    let mut layout_score: i32 = 100;
    if missing_headings.len() > 3 {
        layout_score -= 25;
        issues.push(Issue {
            severity: Severity::High,
            title: "Missing standard section headings".to_string(),
            fix: format!(
                "Add headings: {}.",
                missing_headings
                    .iter()
                    .take(3)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    } else if !missing_headings.is_empty() {
        layout_score -= 10;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Some headings missing".to_string(),
            fix: format!("Consider adding: {}.", missing_headings.join(", ")),
        });
    }

    let bullet_styles: HashSet<char> = lines
        .iter()
        .filter(|line| BULLET_PREFIX.is_match(line))
        .filter_map(|line| line.chars().next())
        .collect();
    if bullet_styles.len() > 1 {
        layout_score -= 10;
        issues.push(Issue {
            severity: Severity::Low,
            title: "Inconsistent bullet style".to_string(),
            fix: "Use a single bullet style throughout (e.g., '-').".to_string(),
        });
    }

    // Parseability: table-like spacing, scanned sources.
    let mut parse_score: i32 = 100;
    if lines.iter().any(|line| TABLE_LIKE.is_match(line)) {
        parse_score -= 20;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Possible table-like formatting".to_string(),
            fix: "Avoid tables or multi-column layouts; use single-column text.".to_string(),
        });
    }
    if input.file_meta.is_some_and(|meta| meta.is_scanned) {
        parse_score -= 35;
        issues.push(Issue {
            severity: Severity::High,
            title: "Low extractable text detected".to_string(),
            fix: "Export a text-based PDF or DOCX instead of a scanned file.".to_string(),
        });
    }

    // Readability: ASCII-only text, visible date ranges.
    let mut readability_score: i32 = 100;
    if text.chars().any(|c| !c.is_ascii()) {
        readability_score -= 10;
        issues.push(Issue {
            severity: Severity::Low,
            title: "Non-standard characters detected".to_string(),
            fix: "Replace special symbols with standard ASCII characters.".to_string(),
        });
    }
    if !MONTH_TOKEN.is_match(&normalized) {
        readability_score -= 10;
        quick_wins.push("Add clear date ranges like \"Jan 2024 - Dec 2025\".".to_string());
    }

    // File quality: enough extractable content to parse.
    let mut file_quality_score: i32 = 100;
    if input.file_meta.map(|meta| meta.text_length).unwrap_or(0) < MIN_TEXT_LENGTH {
        file_quality_score -= 10;
        quick_wins.push("Increase resume content density for better parsing.".to_string());
    }

    let weighted = (layout_score as f64 * 0.35
        + parse_score as f64 * 0.35
        + readability_score as f64 * 0.2
        + file_quality_score as f64 * 0.1)
        .round()
        .max(0.0) as u32;

    let rating = if weighted >= 80 {
        Rating::Pass
    } else if weighted >= 60 {
        Rating::Warn
    } else {
        Rating::Fail
    };

    AtsScore {
        score: weighted,
        rating,
        rubric: Rubric {
            layout: layout_score,
            parseability: parse_score,
            readability: readability_score,
            file_quality: file_quality_score,
        },
        issues,
        quick_wins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned_input(raw_text: &str, text_length: usize) -> AtsScoreInput {
        AtsScoreInput {
            raw_text: raw_text.to_string(),
            file_meta: Some(AtsFileMeta {
                is_scanned: true,
                text_length,
            }),
        }
    }

    const CLEAN_RESUME: &str = "Jane Doe\n\nSUMMARY\nEngineer.\n\nSKILLS\nRust\n\nEXPERIENCE\nEngineer - Co\n- Built things Jan 2020\n\nEDUCATION\nSchool - BS\n\nPROJECTS\nTool\n- Made it\n\nCERTIFICATIONS\n- CKA\n\nADDITIONAL\n- Speaker";

    #[test]
    fn test_scanned_short_resume_scores_below_pass() {
        let score = score_ats_format(&scanned_input("Short resume text", 30));
        assert!(score.score < 80);
        assert!(!score.issues.is_empty());
        // All seven headings missing (-25), scanned (-35), no month token
        // (-10), thin content (-10): 75/65/90/90 weighted to 76.
        assert_eq!(score.score, 76);
        assert_eq!(score.rating, Rating::Warn);
        assert_eq!(score.rubric.layout, 75);
        assert_eq!(score.rubric.parseability, 65);
        assert_eq!(score.rubric.readability, 90);
        assert_eq!(score.rubric.file_quality, 90);
    }

    #[test]
    fn test_clean_resume_passes() {
        let input = AtsScoreInput {
            raw_text: CLEAN_RESUME.to_string(),
            file_meta: Some(AtsFileMeta {
                is_scanned: false,
                text_length: 900,
            }),
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rating, Rating::Pass);
        assert!(score.issues.is_empty());
        assert!(score.quick_wins.is_empty());
    }

    #[test]
    fn test_few_missing_headings_is_a_medium_issue() {
        let text = "SUMMARY\nSKILLS\nEXPERIENCE\nEDUCATION\nPROJECTS\nJan 2020";
        let input = AtsScoreInput {
            raw_text: text.to_string(),
            file_meta: Some(AtsFileMeta {
                is_scanned: false,
                text_length: 900,
            }),
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rubric.layout, 90);
        assert!(score
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Medium
                && issue.title == "Some headings missing"));
    }

    #[test]
    fn test_mixed_bullet_styles_penalized() {
        let text = format!("{CLEAN_RESUME}\n* extra bullet");
        let input = AtsScoreInput {
            raw_text: text,
            file_meta: Some(AtsFileMeta {
                is_scanned: false,
                text_length: 900,
            }),
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rubric.layout, 90);
        assert!(score
            .issues
            .iter()
            .any(|issue| issue.title == "Inconsistent bullet style"));
    }

    #[test]
    fn test_tabs_read_as_table_like_formatting() {
        let text = format!("{CLEAN_RESUME}\nName\tValue");
        let input = AtsScoreInput {
            raw_text: text,
            file_meta: None,
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rubric.parseability, 80);
        assert!(score
            .issues
            .iter()
            .any(|issue| issue.title == "Possible table-like formatting"));
    }

    #[test]
    fn test_non_ascii_characters_penalize_readability() {
        let text = format!("{CLEAN_RESUME}\nCafé experience");
        let input = AtsScoreInput {
            raw_text: text,
            file_meta: Some(AtsFileMeta {
                is_scanned: false,
                text_length: 900,
            }),
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rubric.readability, 90);
    }

    #[test]
    fn test_missing_dates_and_thin_content_are_quick_wins_not_issues() {
        let text = "SUMMARY\nSKILLS\nEXPERIENCE\nEDUCATION\nPROJECTS\nCERTIFICATIONS\nADDITIONAL";
        let input = AtsScoreInput {
            raw_text: text.to_string(),
            file_meta: None,
        };
        let score = score_ats_format(&input);
        assert!(score.issues.is_empty());
        assert_eq!(score.quick_wins.len(), 2);
        assert_eq!(score.rubric.readability, 90);
        assert_eq!(score.rubric.file_quality, 90);
    }

    #[test]
    fn test_full_month_names_count_as_date_tokens() {
        let text = format!("{CLEAN_RESUME}\nJanuary 2024 - December 2025");
        let input = AtsScoreInput {
            raw_text: text,
            file_meta: Some(AtsFileMeta {
                is_scanned: false,
                text_length: 900,
            }),
        };
        let score = score_ats_format(&input);
        assert_eq!(score.rubric.readability, 100);
    }

    #[test]
    fn test_empty_text_is_scored_without_error() {
        let score = score_ats_format(&AtsScoreInput {
            raw_text: String::new(),
            file_meta: None,
        });
        // 75/100/90/90 weighted: only the missing headings and quick wins
        // register against empty input.
        assert_eq!(score.score, 88);
        assert_eq!(score.rating, Rating::Pass);
    }
}
