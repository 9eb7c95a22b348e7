//! Cover-letter generation: a completion-service draft verified against the
//! resume and job description, with a deterministic templated fallback.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{ChatMessage, CompletionService};
use crate::matching::keywords::extract_keywords;
use crate::models::resume::Resume;
use crate::tailoring::fact_lock::extract_capital_phrases;
use crate::tailoring::prompts::{COVER_LETTER_SYSTEM, COVER_LETTER_TEMPERATURE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Confident,
    Concise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterLength {
    Short,
    #[default]
    Standard,
    Detailed,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct CoverLetterOptions {
    pub tone: Tone,
    pub length: LetterLength,
}

/// Drafts a cover letter. The completion draft is accepted only when every
/// multi-word capitalized phrase it uses already appears in the resume or
/// the job description; otherwise the deterministic template runs.
pub async fn generate_cover_letter(
    llm: &dyn CompletionService,
    resume: &Resume,
    job_description: &str,
    options: CoverLetterOptions,
) -> String {
    let resume_json = serde_json::to_string(resume).unwrap_or_default();
    let messages = [
        ChatMessage::system(COVER_LETTER_SYSTEM),
        ChatMessage::user(format!(
            "Resume:\n{resume_json}\n\nJob Description:\n{job_description}\n\nTone:{:?}\nLength:{:?}",
            options.tone, options.length
        )),
    ];

    if let Some(response) = llm.complete(&messages, COVER_LETTER_TEMPERATURE).await {
        let candidate = response.trim().to_string();
        if !candidate.is_empty()
            && validate_cover_letter(&resume_json, job_description, &candidate)
        {
            return candidate;
        }
        warn!("Cover letter draft rejected; using templated letter");
    }

    fallback_letter(resume, job_description, options)
}

/// Every multi-word capitalized phrase in the letter must already occur in
/// the resume JSON or job description (case-insensitive).
fn validate_cover_letter(resume_json: &str, job_description: &str, letter: &str) -> bool {
    let baseline = format!("{resume_json}\n{job_description}").to_lowercase();
    extract_capital_phrases(letter)
        .iter()
        .all(|phrase| baseline.contains(&phrase.to_lowercase()))
}

/// Deterministic letter assembled from top keywords, leading skills, and a
/// tone-dependent opener; paragraph count tracks the requested length.
fn fallback_letter(resume: &Resume, job_description: &str, options: CoverLetterOptions) -> String {
    let keywords: Vec<String> = extract_keywords(job_description)
        .into_iter()
        .take(6)
        .collect();
    let name = if resume.contact.name.is_empty() {
        "Candidate"
    } else {
        resume.contact.name.as_str()
    };
    let summary = if resume.summary.is_empty() {
        "a strong fit for the role"
    } else {
        resume.summary.as_str()
    };
    let skills = resume
        .skills
        .iter()
        .take(6)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let skills = if skills.is_empty() {
        "relevant skills".to_string()
    } else {
        skills
    };

    let opener = match options.tone {
        Tone::Confident => "I am excited to apply and confident I can contribute immediately.",
        Tone::Concise => "I am applying for this role with strong alignment to the requirements.",
        Tone::Professional => "I am writing to express interest in this role and share my alignment.",
    };

    let paragraph_count = match options.length {
        LetterLength::Short => 2,
        LetterLength::Standard => 3,
        LetterLength::Detailed => 4,
    };

    let paragraphs = [
        format!(
            "Dear Hiring Manager,\n\n{opener} With experience as {summary}, I focus on {}.",
            keywords.join(", ")
        ),
        format!(
            "My background includes {skills} and delivering results through collaboration. \
             I prioritize clarity, impact, and measurable outcomes."
        ),
        "I would welcome the opportunity to discuss how my experience can support your team."
            .to_string(),
        "Thank you for your time and consideration.".to_string(),
    ];

    format!(
        "{}\n\nSincerely,\n{}",
        paragraphs[..paragraph_count].join("\n\n"),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Contact;
    use async_trait::async_trait;

    struct FakeCompletion(Option<String>);

    #[async_trait]
    impl CompletionService for FakeCompletion {
        async fn complete(&self, _messages: &[ChatMessage], _temperature: f32) -> Option<String> {
            self.0.clone()
        }
    }

    fn sample_resume() -> Resume {
        Resume {
            contact: Contact {
                name: "Jane Doe".to_string(),
                ..Default::default()
            },
            summary: "an engineer at Example Co".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unavailable_service_uses_template() {
        let llm = FakeCompletion(None);
        let letter = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions::default(),
        )
        .await;
        assert!(letter.starts_with("Dear Hiring Manager,"));
        assert!(letter.ends_with("Sincerely,\nJane Doe"));
        assert!(letter.contains("Rust, SQL"));
    }

    #[tokio::test]
    async fn test_verified_draft_is_returned_as_is() {
        // "Jane Doe" appears in the resume JSON, so the draft verifies.
        let draft = "I am Jane Doe and I would like this role.";
        let llm = FakeCompletion(Some(draft.to_string()));
        let letter = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions::default(),
        )
        .await;
        assert_eq!(letter, draft);
    }

    #[tokio::test]
    async fn test_fabricating_draft_falls_back_to_template() {
        let llm = FakeCompletion(Some(
            "I previously worked at Initech Systems on their payroll stack.".to_string(),
        ));
        let letter = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions::default(),
        )
        .await;
        assert!(letter.starts_with("Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_empty_draft_falls_back_to_template() {
        let llm = FakeCompletion(Some("   ".to_string()));
        let letter = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions::default(),
        )
        .await;
        assert!(letter.starts_with("Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_length_controls_paragraph_count() {
        let llm = FakeCompletion(None);
        for (length, expected) in [
            (LetterLength::Short, 2),
            (LetterLength::Standard, 3),
            (LetterLength::Detailed, 4),
        ] {
            let letter = generate_cover_letter(
                &llm,
                &sample_resume(),
                "Rust engineer role",
                CoverLetterOptions {
                    tone: Tone::Professional,
                    length,
                },
            )
            .await;
            let body = letter
                .split("\n\nSincerely,")
                .next()
                .unwrap()
                .replace("Dear Hiring Manager,\n\n", "Dear Hiring Manager, ");
            assert_eq!(body.split("\n\n").count(), expected, "{length:?}");
        }
    }

    #[tokio::test]
    async fn test_tone_selects_opener() {
        let llm = FakeCompletion(None);
        let confident = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions {
                tone: Tone::Confident,
                length: LetterLength::Short,
            },
        )
        .await;
        assert!(confident.contains("confident I can contribute immediately"));

        let concise = generate_cover_letter(
            &llm,
            &sample_resume(),
            "Rust engineer role",
            CoverLetterOptions {
                tone: Tone::Concise,
                length: LetterLength::Short,
            },
        )
        .await;
        assert!(concise.contains("strong alignment to the requirements"));
    }

    #[tokio::test]
    async fn test_template_defaults_for_empty_resume() {
        let llm = FakeCompletion(None);
        let letter = generate_cover_letter(
            &llm,
            &Resume::default(),
            "Rust engineer role",
            CoverLetterOptions::default(),
        )
        .await;
        assert!(letter.contains("a strong fit for the role"));
        assert!(letter.contains("relevant skills"));
        assert!(letter.ends_with("Sincerely,\nCandidate"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CoverLetterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.tone, Tone::Professional);
        assert_eq!(options.length, LetterLength::Standard);

        let options: CoverLetterOptions =
            serde_json::from_str(r#"{"tone":"Confident","length":"Detailed"}"#).unwrap();
        assert_eq!(options.tone, Tone::Confident);
        assert_eq!(options.length, LetterLength::Detailed);
    }
}
