//! Tailoring pipeline — reorders resume content by job-description keyword
//! relevance and optionally rewrites the summary through the completion
//! service under fact-lock.
//!
//! Flow: extract keywords → stable reorder (skills, bullets) → fact-locked
//! summary rewrite → section visibility → match score → change log.
//! Never fails: a missing or rejected rewrite keeps the original summary.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::{ChatMessage, CompletionService};
use crate::matching::keywords::extract_keywords;
use crate::matching::scorer::{compute_match_score, MatchScore};
use crate::models::resume::Resume;
use crate::resume::plaintext::SECTION_KEYS;
use crate::tailoring::fact_lock::fact_lock_check;
use crate::tailoring::prompts::{SUMMARY_REWRITE_SYSTEM, SUMMARY_REWRITE_TEMPERATURE};

/// Minimum accepted length for a rewritten summary.
const MIN_REWRITE_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub struct TailorInput {
    pub resume: Resume,
    pub job_description: String,
    pub section_order: Vec<String>,
    pub include_sections: Vec<String>,
    /// Raw extracted text as uploaded; carried for parity with the client
    /// payload, not consumed by the pipeline.
    #[allow(dead_code)]
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorChange {
    pub section: String,
    pub before: String,
    pub after: String,
    pub reason: String,
    pub keywords_added: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredOutput {
    pub resume: Resume,
    #[serde(rename = "match")]
    pub match_score: MatchScore,
    pub changes: Vec<TailorChange>,
    pub enhanced_areas: Vec<String>,
}

/// Runs the tailoring pipeline. Total: every failure of the completion
/// service or its verification degrades to the deterministic reorder-only
/// output.
pub async fn tailor_resume(llm: &dyn CompletionService, input: TailorInput) -> TailoredOutput {
    let TailorInput {
        resume,
        job_description,
        section_order,
        include_sections,
        raw_text: _,
    } = input;

    let original = resume.clone();
    let keywords = extract_keywords(&job_description);

    let mut tailored = resume;
    tailored.skills = reorder_by_keywords(tailored.skills, &keywords);
    for entry in &mut tailored.experience {
        entry.bullets = reorder_by_keywords(std::mem::take(&mut entry.bullets), &keywords);
    }
    for project in &mut tailored.projects {
        project.bullets = reorder_by_keywords(std::mem::take(&mut project.bullets), &keywords);
    }

    if !tailored.summary.is_empty() {
        if let Some(rewritten) =
            maybe_rewrite_summary(llm, &tailored.summary, &job_description).await
        {
            if fact_lock_check(&original, &rewritten) {
                tailored.summary = rewritten;
            } else {
                warn!("Summary rewrite rejected by fact-lock verification");
            }
        }
    }

    let reordered = apply_section_order(tailored, &section_order, &include_sections);
    let match_score = compute_match_score(&reordered, &job_description);
    let changes = build_changes(&original, &reordered, &keywords);

    TailoredOutput {
        resume: reordered,
        match_score,
        changes,
        enhanced_areas: vec![
            "Reordered bullets to surface JD-aligned experience.".to_string(),
            "Prioritized existing skills that match the job description.".to_string(),
        ],
    }
}

/// Stable descending sort by count of case-insensitive keyword-substring
/// hits; ties keep their original relative order.
pub fn reorder_by_keywords(items: Vec<String>, keywords: &[String]) -> Vec<String> {
    if items.is_empty() {
        return items;
    }
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut scored: Vec<(String, usize)> = items
        .into_iter()
        .map(|item| {
            let text = item.to_lowercase();
            let score = lowered
                .iter()
                .filter(|keyword| text.contains(keyword.as_str()))
                .count();
            (item, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(item, _)| item).collect()
}

async fn maybe_rewrite_summary(
    llm: &dyn CompletionService,
    summary: &str,
    job_description: &str,
) -> Option<String> {
    let messages = [
        ChatMessage::system(SUMMARY_REWRITE_SYSTEM),
        ChatMessage::user(format!(
            "Summary:\n{summary}\n\nJob Description:\n{job_description}"
        )),
    ];
    let response = llm.complete(&messages, SUMMARY_REWRITE_TEMPERATURE).await?;
    let result = response.trim().to_string();
    if result.chars().count() < MIN_REWRITE_CHARS {
        return None;
    }
    Some(result)
}

/// Clears sections not in `include_sections`; contact is not part of the
/// clearable set. The struct field order is fixed, so `section_order` only
/// matters to consumers that re-apply it at render time.
fn apply_section_order(
    mut resume: Resume,
    _section_order: &[String],
    include_sections: &[String],
) -> Resume {
    for section in SECTION_KEYS {
        if include_sections.iter().any(|included| included == section) {
            continue;
        }
        match *section {
            "summary" => resume.summary.clear(),
            "skills" => resume.skills.clear(),
            "experience" => resume.experience.clear(),
            "education" => resume.education.clear(),
            "projects" => resume.projects.clear(),
            "certifications" => resume.certifications.clear(),
            "additional" => resume.additional.clear(),
            _ => {}
        }
    }
    resume
}

fn keywords_present(text: &str, keywords: &[String]) -> Vec<String> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lowered.contains(keyword.as_str()))
        .cloned()
        .collect()
}

/// One change entry per section whose content differs between the original
/// and tailored resume, tagged with the keywords its new text carries.
fn build_changes(original: &Resume, tailored: &Resume, keywords: &[String]) -> Vec<TailorChange> {
    let mut changes = Vec::new();

    if original.summary != tailored.summary && !tailored.summary.is_empty() {
        changes.push(TailorChange {
            section: "Summary".to_string(),
            before: original.summary.clone(),
            after: tailored.summary.clone(),
            reason: "Rephrased to align with role language without adding facts.".to_string(),
            keywords_added: keywords_present(&tailored.summary, keywords),
        });
    }

    if original.skills.join(",") != tailored.skills.join(",") {
        changes.push(TailorChange {
            section: "Skills".to_string(),
            before: original.skills.join(", "),
            after: tailored.skills.join(", "),
            reason: "Reordered existing skills to surface relevant keywords.".to_string(),
            keywords_added: keywords_present(&tailored.skills.join(" "), keywords),
        });
    }

    for (index, entry) in original.experience.iter().enumerate() {
        let Some(next) = tailored.experience.get(index) else {
            continue;
        };
        if entry.bullets.join("|") != next.bullets.join("|") {
            changes.push(TailorChange {
                section: format!("Experience {}", index + 1),
                before: entry.bullets.join(" • "),
                after: next.bullets.join(" • "),
                reason: "Reordered bullets to emphasize relevant impact.".to_string(),
                keywords_added: keywords_present(&next.bullets.join(" "), keywords),
            });
        }
    }

    for (index, entry) in original.projects.iter().enumerate() {
        let Some(next) = tailored.projects.get(index) else {
            continue;
        };
        if entry.bullets.join("|") != next.bullets.join("|") {
            changes.push(TailorChange {
                section: format!("Projects {}", index + 1),
                before: entry.bullets.join(" • "),
                after: next.bullets.join(" • "),
                reason: "Reordered bullets to highlight relevant project work.".to_string(),
                keywords_added: keywords_present(&next.bullets.join(" "), keywords),
            });
        }
    }

    changes
}
