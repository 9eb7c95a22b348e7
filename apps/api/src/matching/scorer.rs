//! Resume-vs-job-description match scoring: keyword coverage, per-section
//! term-frequency cosine similarity, and a role-fit heuristic blended into
//! one overall percentage.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::keywords::{extract_keywords, normalize_job_description, STOPWORDS};
use crate::models::resume::Resume;
use crate::text::normalize_text;

const MAX_MISSING_KEYWORDS: usize = 30;

const SENIORITY_SIGNALS: &[&str] = &["senior", "lead", "principal", "staff", "manager"];
const TOOL_SIGNALS: &[&str] = &["aws", "azure", "gcp", "kubernetes", "docker", "react"];

static NON_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9+.#\s-]").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScores {
    pub summary: u32,
    pub skills: u32,
    pub experience: u32,
    pub projects: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub overall: u32,
    pub sections: SectionScores,
    pub missing_keywords: Vec<String>,
}

/// Scores a resume against a job description. Total over any input; an empty
/// job description yields zeros and an empty keyword list.
pub fn compute_match_score(resume: &Resume, jd_text: &str) -> MatchScore {
    let normalized_jd = normalize_job_description(jd_text);
    let keywords = extract_keywords(&normalized_jd);

    let experience_text = resume
        .experience
        .iter()
        .map(|entry| entry.bullets.join(" "))
        .collect::<Vec<_>>()
        .join(" ");
    let project_text = resume
        .projects
        .iter()
        .map(|project| project.bullets.join(" "))
        .collect::<Vec<_>>()
        .join(" ");

    let resume_text = [
        resume.summary.clone(),
        resume.skills.join(" "),
        experience_text.clone(),
        project_text.clone(),
    ]
    .join(" ")
    .to_lowercase();

    let hits = keywords
        .iter()
        .filter(|keyword| resume_text.contains(keyword.as_str()))
        .count();
    let mut missing: Vec<String> = keywords
        .iter()
        .filter(|keyword| !resume_text.contains(keyword.as_str()))
        .cloned()
        .collect();
    missing.truncate(MAX_MISSING_KEYWORDS);

    let keyword_coverage = if keywords.is_empty() {
        0
    } else {
        ((hits as f64 / keywords.len() as f64) * 100.0).round() as u32
    };

    let sections = SectionScores {
        summary: semantic_score(&resume.summary, &normalized_jd),
        skills: semantic_score(&resume.skills.join(" "), &normalized_jd),
        experience: semantic_score(&experience_text, &normalized_jd),
        projects: semantic_score(&project_text, &normalized_jd),
    };
    let semantic_avg = ((sections.summary + sections.skills + sections.experience
        + sections.projects) as f64
        / 4.0)
        .round();

    let role_fit = role_fit_heuristic(&normalized_jd, &resume_text);

    let overall = (keyword_coverage as f64 * 0.4 + semantic_avg * 0.4 + role_fit as f64 * 0.2)
        .round() as u32;

    MatchScore {
        overall,
        sections,
        missing_keywords: missing,
    }
}

/// Term-frequency cosine similarity scaled to [0, 100]; zero when either
/// vector has zero norm.
fn semantic_score(source: &str, target: &str) -> u32 {
    let vector_a = term_frequency(source);
    let vector_b = term_frequency(target);

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (term, a) in &vector_a {
        norm_a += a * a;
        if let Some(b) = vector_b.get(term) {
            dot += a * b;
        }
    }
    for b in vector_b.values() {
        norm_b += b * b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0;
    }
    let cosine = dot / (norm_a.sqrt() * norm_b.sqrt());
    ((cosine * 100.0).round() as u32).min(100)
}

fn term_frequency(text: &str) -> HashMap<String, f64> {
    let normalized = normalize_text(text).to_lowercase();
    let cleaned = NON_TOKEN.replace_all(&normalized, " ");
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in cleaned
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOPWORDS.contains(token))
    {
        *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Seniority/tooling alignment heuristic: starts at 50, rewards shared
/// signals, penalizes seniority words the resume lacks, clamped to [0, 100].
fn role_fit_heuristic(jd_text: &str, resume_text: &str) -> u32 {
    let lower_jd = jd_text.to_lowercase();
    let mut score: i32 = 50;

    for signal in SENIORITY_SIGNALS {
        if lower_jd.contains(signal) {
            if resume_text.contains(signal) {
                score += 8;
            } else {
                score -= 4;
            }
        }
    }
    for signal in TOOL_SIGNALS {
        if lower_jd.contains(signal) && resume_text.contains(signal) {
            score += 5;
        }
    }

    score.clamp(0, 100) as u32
}
