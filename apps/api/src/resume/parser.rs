//! Heuristic resume segmenter/parser.
//!
//! Splits normalized text into sections on exact full-line heading matches,
//! then runs one parsing strategy per section kind. Best-effort by design:
//! malformed or heading-less input degrades to an all-empty `Resume`, never
//! an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, Resume};
use crate::text::{is_bullet, strip_bullet, to_lines};

/// Section kinds a heading can open. `Header` is the implicit section before
/// the first recognized heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
    Additional,
}

/// Ordered heading vocabulary: uppercase alias to the section it opens.
/// Matched case-insensitively against the entire line.
pub const HEADING_VOCABULARY: &[(&str, SectionKind)] = &[
    ("SUMMARY", SectionKind::Summary),
    ("PROFESSIONAL SUMMARY", SectionKind::Summary),
    ("OBJECTIVE", SectionKind::Summary),
    ("SKILLS", SectionKind::Skills),
    ("TECHNICAL SKILLS", SectionKind::Skills),
    ("EXPERIENCE", SectionKind::Experience),
    ("WORK EXPERIENCE", SectionKind::Experience),
    ("PROFESSIONAL EXPERIENCE", SectionKind::Experience),
    ("EMPLOYMENT HISTORY", SectionKind::Experience),
    ("EDUCATION", SectionKind::Education),
    ("PROJECTS", SectionKind::Projects),
    ("CERTIFICATIONS", SectionKind::Certifications),
    ("CERTIFICATES", SectionKind::Certifications),
    ("ADDITIONAL", SectionKind::Additional),
    ("ADDITIONAL INFORMATION", SectionKind::Additional),
];

/// Canonical heading names, in serialization order. Used by the plain-text
/// serializer and the ATS layout scan.
pub const CANONICAL_HEADINGS: &[&str] = &[
    "SUMMARY",
    "SKILLS",
    "EXPERIENCE",
    "EDUCATION",
    "PROJECTS",
    "CERTIFICATIONS",
    "ADDITIONAL",
];

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w.+-]+@[\w.-]+\.\w+\b").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,2}[\s-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").unwrap()
});

fn pick_heading(line: &str) -> Option<SectionKind> {
    let upper = line.to_uppercase();
    HEADING_VOCABULARY
        .iter()
        .find(|(alias, _)| upper == *alias)
        .map(|(_, kind)| *kind)
}

/// Parses free-form resume text into a structured `Resume`.
pub fn parse_resume_from_text(text: &str) -> Resume {
    let mut resume = Resume::default();
    if text.is_empty() {
        return resume;
    }

    let mut sections: HashMap<SectionKind, Vec<String>> = HashMap::new();
    let mut current = SectionKind::Header;
    sections.insert(current, Vec::new());

    for line in to_lines(text) {
        if let Some(kind) = pick_heading(&line) {
            current = kind;
            // A repeated heading resets that section's buffer.
            sections.insert(kind, Vec::new());
            continue;
        }
        sections.entry(current).or_default().push(line);
    }

    let mut take = |kind: SectionKind| sections.remove(&kind).unwrap_or_default();

    parse_header(&take(SectionKind::Header), &mut resume);
    resume.summary = take(SectionKind::Summary).join(" ");
    resume.skills = parse_skills(&take(SectionKind::Skills));
    resume.experience = parse_experience(&take(SectionKind::Experience));
    resume.education = parse_education(&take(SectionKind::Education));
    resume.projects = parse_projects(&take(SectionKind::Projects));
    resume.certifications = parse_simple_list(&take(SectionKind::Certifications));
    resume.additional = parse_simple_list(&take(SectionKind::Additional));

    resume
}

/// Header strategy: first line is the name, second the title; email and
/// phone are the first pattern matches across all header lines joined.
fn parse_header(lines: &[String], resume: &mut Resume) {
    if lines.is_empty() {
        return;
    }
    resume.contact.name = lines.first().cloned().unwrap_or_default();
    resume.contact.title = lines.get(1).cloned().unwrap_or_default();

    let contact_line = lines.join(" ");
    if let Some(found) = EMAIL.find(&contact_line) {
        resume.contact.email = found.as_str().to_string();
    }
    if let Some(found) = PHONE.find(&contact_line) {
        resume.contact.phone = found.as_str().to_string();
    }
}

/// Skills strategy: joined lines split on comma or pipe, trimmed, empties
/// dropped, order preserved.
fn parse_skills(lines: &[String]) -> Vec<String> {
    lines
        .join(" ")
        .split(|c| c == ',' || c == '|')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// Experience strategy: a non-bullet line containing `" - "` opens an entry
/// (role/company from the first two parts); all-caps non-bullet lines are
/// stray heading noise; everything else becomes a bullet.
fn parse_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;

    for line in lines {
        if !is_bullet(line) && *line == line.to_uppercase() {
            continue;
        }
        if !is_bullet(line) && line.contains(" - ") {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            let mut parts = line.split(" - ").map(str::trim);
            current = Some(ExperienceEntry {
                role: parts.next().unwrap_or_default().to_string(),
                company: parts.next().unwrap_or_default().to_string(),
                ..Default::default()
            });
            continue;
        }
        let entry = current.get_or_insert_with(ExperienceEntry::default);
        entry.bullets.push(if is_bullet(line) {
            strip_bullet(line)
        } else {
            line.clone()
        });
    }
    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
        .into_iter()
        .filter(|entry| !entry.bullets.is_empty() || !entry.role.is_empty())
        .collect()
}

/// Education strategy: same delimiter rule as experience but without the
/// all-caps skip; lines become details.
fn parse_education(lines: &[String]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current: Option<EducationEntry> = None;

    for line in lines {
        if !is_bullet(line) && line.contains(" - ") {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            let mut parts = line.split(" - ").map(str::trim);
            current = Some(EducationEntry {
                school: parts.next().unwrap_or_default().to_string(),
                degree: parts.next().unwrap_or_default().to_string(),
                ..Default::default()
            });
            continue;
        }
        let entry = current.get_or_insert_with(EducationEntry::default);
        entry.details.push(if is_bullet(line) {
            strip_bullet(line)
        } else {
            line.clone()
        });
    }
    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
        .into_iter()
        .filter(|entry| !entry.school.is_empty() || !entry.details.is_empty())
        .collect()
}

/// Projects strategy: any non-bullet line opens an entry, name/link split on
/// `" - "` when present.
fn parse_projects(lines: &[String]) -> Vec<ProjectEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ProjectEntry> = None;

    for line in lines {
        if !is_bullet(line) {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            let mut parts = line.split(" - ").map(str::trim);
            current = Some(ProjectEntry {
                name: parts.next().unwrap_or_default().to_string(),
                link: parts
                    .next()
                    .filter(|link| !link.is_empty())
                    .map(str::to_string),
                bullets: Vec::new(),
            });
            continue;
        }
        let entry = current.get_or_insert_with(ProjectEntry::default);
        entry.bullets.push(strip_bullet(line));
    }
    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
        .into_iter()
        .filter(|entry| !entry.name.is_empty() || !entry.bullets.is_empty())
        .collect()
}

/// Certifications/additional strategy: one list item per line, bullet
/// markers stripped.
fn parse_simple_list(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_bullet(line))
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\nSoftware Engineer\n\nSUMMARY\nBuilder of web apps.\n\nSKILLS\nJavaScript, React, SQL\n\nEXPERIENCE\nSoftware Engineer - Example Co\n- Built features\n\nEDUCATION\nExample University - BS Computer Science";

    #[test]
    fn test_parse_sample_resume_structure() {
        let resume = parse_resume_from_text(SAMPLE);
        assert_eq!(resume.contact.name, "Jane Doe");
        assert_eq!(resume.contact.title, "Software Engineer");
        assert!(resume.summary.contains("Builder"));
        assert!(resume.skills.contains(&"JavaScript".to_string()));
        assert!(!resume.experience.is_empty());
        assert!(!resume.education.is_empty());
    }

    #[test]
    fn test_parse_empty_input_yields_default_resume() {
        assert_eq!(parse_resume_from_text(""), Resume::default());
    }

    #[test]
    fn test_parse_heading_less_input_yields_header_only() {
        let resume = parse_resume_from_text("Jane Doe\nEngineer");
        assert_eq!(resume.contact.name, "Jane Doe");
        assert_eq!(resume.contact.title, "Engineer");
        assert!(resume.summary.is_empty());
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn test_header_extracts_email_and_phone() {
        let resume = parse_resume_from_text(
            "Jane Doe\nEngineer\njane.doe+jobs@example.io | +1 (555) 123-4567",
        );
        assert_eq!(resume.contact.email, "jane.doe+jobs@example.io");
        assert!(resume.contact.phone.contains("555"));
    }

    #[test]
    fn test_heading_match_is_case_insensitive_and_exact() {
        let resume = parse_resume_from_text("Jane\n\nsummary\nShips things.");
        assert_eq!(resume.summary, "Ships things.");
        // A line merely containing a heading word is not a heading.
        let resume = parse_resume_from_text("Jane\n\nMy summary follows\nShips things.");
        assert!(resume.summary.is_empty());
    }

    #[test]
    fn test_heading_aliases_map_to_canonical_sections() {
        let text = "Jane Doe\n\nWORK EXPERIENCE\nEngineer - Acme\n- Shipped\n\nTECHNICAL SKILLS\nRust | Go";
        let resume = parse_resume_from_text(text);
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_skills_split_on_comma_and_pipe() {
        let resume = parse_resume_from_text("Jane\n\nSKILLS\nRust, Go | SQL,  , TypeScript");
        assert_eq!(resume.skills, vec!["Rust", "Go", "SQL", "TypeScript"]);
    }

    #[test]
    fn test_experience_skips_all_caps_noise_lines() {
        let text = "Jane\n\nEXPERIENCE\nACME DIVISION\nEngineer - Acme\n- Built it";
        let resume = parse_resume_from_text(text);
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].role, "Engineer");
        assert_eq!(resume.experience[0].company, "Acme");
        assert_eq!(resume.experience[0].bullets, vec!["Built it"]);
    }

    #[test]
    fn test_experience_delimiter_keeps_first_two_parts() {
        let resume =
            parse_resume_from_text("Jane\n\nEXPERIENCE\nEngineer - Acme - Remote\n- Did work");
        assert_eq!(resume.experience[0].role, "Engineer");
        assert_eq!(resume.experience[0].company, "Acme");
    }

    #[test]
    fn test_experience_non_bullet_lines_become_bullets() {
        let text = "Jane\n\nEXPERIENCE\nEngineer - Acme\nShipped the flagship product\n- Cut latency";
        let resume = parse_resume_from_text(text);
        assert_eq!(
            resume.experience[0].bullets,
            vec!["Shipped the flagship product", "Cut latency"]
        );
    }

    #[test]
    fn test_experience_orphan_bullets_form_anonymous_entry() {
        let resume = parse_resume_from_text("Jane\n\nEXPERIENCE\n- Did a thing");
        assert_eq!(resume.experience.len(), 1);
        assert!(resume.experience[0].role.is_empty());
        assert_eq!(resume.experience[0].bullets, vec!["Did a thing"]);
    }

    #[test]
    fn test_education_does_not_skip_all_caps_lines() {
        let text = "Jane\n\nEDUCATION\nMIT - BS\nGPA 3.9";
        let resume = parse_resume_from_text(text);
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].details, vec!["GPA 3.9"]);
    }

    #[test]
    fn test_projects_split_name_and_link() {
        let text = "Jane\n\nPROJECTS\nSearch Tool - https://example.com\n- Indexed docs\nSide Project\n- Built CLI";
        let resume = parse_resume_from_text(text);
        assert_eq!(resume.projects.len(), 2);
        assert_eq!(resume.projects[0].name, "Search Tool");
        assert_eq!(
            resume.projects[0].link.as_deref(),
            Some("https://example.com")
        );
        assert_eq!(resume.projects[1].name, "Side Project");
        assert_eq!(resume.projects[1].link, None);
    }

    #[test]
    fn test_simple_list_strips_bullet_markers() {
        let text = "Jane\n\nCERTIFICATIONS\n- AWS Solutions Architect\n1. CKA";
        let resume = parse_resume_from_text(text);
        assert_eq!(
            resume.certifications,
            vec!["AWS Solutions Architect", "CKA"]
        );
    }

    #[test]
    fn test_repeated_heading_resets_section_buffer() {
        let text = "Jane\n\nSKILLS\nRust\n\nSKILLS\nGo";
        let resume = parse_resume_from_text(text);
        assert_eq!(resume.skills, vec!["Go"]);
    }
}
