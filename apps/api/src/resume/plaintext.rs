//! Plain-text serialization of a `Resume`, shared by the preview layer and
//! the fact-lock verifier. Emission honors the same section order/visibility
//! rules the tailoring pipeline applies.

use crate::models::resume::Resume;

/// Section keys in default serialization order (lowercase wire names).
pub const SECTION_KEYS: &[&str] = &[
    "summary",
    "skills",
    "experience",
    "education",
    "projects",
    "certifications",
    "additional",
];

/// Optional ordering/visibility overrides for serialization. `None` means
/// default order / all sections included.
#[derive(Debug, Clone, Default)]
pub struct PlainTextOptions {
    pub section_order: Option<Vec<String>>,
    pub include_sections: Option<Vec<String>>,
}

/// `"start - end"`, a lone side when the other is empty, empty when both are.
pub fn format_date_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, false) => format!("{start} - {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
    }
}

fn join_nonempty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Serializes the resume as ATS-safe plain text: a pipe-joined contact line,
/// then each included section in order under its canonical heading, bullets
/// prefixed `"- "`, blank-line separated.
pub fn resume_to_plain_text(resume: &Resume, options: &PlainTextOptions) -> String {
    let mut parts: Vec<String> = Vec::new();

    let contact = &resume.contact;
    let contact_line = join_nonempty(
        &[
            &contact.name,
            &contact.title,
            &contact.location,
            &contact.phone,
            &contact.email,
            &contact.linkedin,
            &contact.github,
        ],
        " | ",
    );
    if !contact_line.is_empty() {
        parts.push(contact_line);
        parts.push(String::new());
    }

    let default_order: Vec<String> = SECTION_KEYS.iter().map(|s| s.to_string()).collect();
    let order = options.section_order.as_ref().unwrap_or(&default_order);
    let include = options.include_sections.as_ref().unwrap_or(order);

    for section in order {
        if !include.contains(section) {
            continue;
        }
        emit_section(resume, section, &mut parts);
    }

    parts.join("\n").trim().to_string()
}

fn emit_section(resume: &Resume, section: &str, parts: &mut Vec<String>) {
    match section {
        "summary" => {
            if !resume.summary.is_empty() {
                parts.push("SUMMARY".to_string());
                parts.push(resume.summary.clone());
                parts.push(String::new());
            }
        }
        "skills" => {
            if !resume.skills.is_empty() {
                parts.push("SKILLS".to_string());
                parts.push(resume.skills.join(", "));
                parts.push(String::new());
            }
        }
        "experience" => {
            if !resume.experience.is_empty() {
                parts.push("EXPERIENCE".to_string());
                for item in &resume.experience {
                    let header = join_nonempty(&[&item.role, &item.company], " - ");
                    let dates = format_date_range(&item.start_date, &item.end_date);
                    let meta = join_nonempty(&[&item.location, &dates], " | ");
                    if !header.is_empty() {
                        parts.push(header);
                    }
                    if !meta.is_empty() {
                        parts.push(meta);
                    }
                    for bullet in &item.bullets {
                        parts.push(format!("- {bullet}"));
                    }
                    parts.push(String::new());
                }
            }
        }
        "education" => {
            if !resume.education.is_empty() {
                parts.push("EDUCATION".to_string());
                for item in &resume.education {
                    let header = join_nonempty(&[&item.school, &item.degree], " - ");
                    let dates = format_date_range(&item.start_date, &item.end_date);
                    let meta = join_nonempty(&[&item.location, &dates], " | ");
                    if !header.is_empty() {
                        parts.push(header);
                    }
                    if !meta.is_empty() {
                        parts.push(meta);
                    }
                    for detail in &item.details {
                        parts.push(format!("- {detail}"));
                    }
                    parts.push(String::new());
                }
            }
        }
        "projects" => {
            if !resume.projects.is_empty() {
                parts.push("PROJECTS".to_string());
                for project in &resume.projects {
                    let link = project.link.as_deref().unwrap_or_default();
                    let header = join_nonempty(&[&project.name, link], " - ");
                    if !header.is_empty() {
                        parts.push(header);
                    }
                    for bullet in &project.bullets {
                        parts.push(format!("- {bullet}"));
                    }
                    parts.push(String::new());
                }
            }
        }
        "certifications" => {
            if !resume.certifications.is_empty() {
                parts.push("CERTIFICATIONS".to_string());
                for cert in &resume.certifications {
                    parts.push(format!("- {cert}"));
                }
                parts.push(String::new());
            }
        }
        "additional" => {
            if !resume.additional.is_empty() {
                parts.push("ADDITIONAL".to_string());
                for line in &resume.additional {
                    parts.push(format!("- {line}"));
                }
                parts.push(String::new());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, ExperienceEntry};

    fn sample_resume() -> Resume {
        Resume {
            contact: Contact {
                name: "Jane Doe".to_string(),
                title: "Engineer".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            summary: "Builds resilient services.".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                role: "Engineer".to_string(),
                company: "Example Co".to_string(),
                location: "Remote".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Dec 2022".to_string(),
                bullets: vec!["Shipped the platform".to_string()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_line_joins_nonempty_fields_with_pipes() {
        let text = resume_to_plain_text(&sample_resume(), &PlainTextOptions::default());
        assert!(text.starts_with("Jane Doe | Engineer | jane@example.com"));
    }

    #[test]
    fn test_sections_emit_canonical_headings_and_bullets() {
        let text = resume_to_plain_text(&sample_resume(), &PlainTextOptions::default());
        assert!(text.contains("SUMMARY\nBuilds resilient services."));
        assert!(text.contains("SKILLS\nRust, SQL"));
        assert!(text.contains("EXPERIENCE\nEngineer - Example Co\nRemote | Jan 2020 - Dec 2022\n- Shipped the platform"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = resume_to_plain_text(&sample_resume(), &PlainTextOptions::default());
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("PROJECTS"));
    }

    #[test]
    fn test_include_sections_filters_output() {
        let options = PlainTextOptions {
            section_order: None,
            include_sections: Some(vec!["skills".to_string()]),
        };
        let text = resume_to_plain_text(&sample_resume(), &options);
        assert!(text.contains("SKILLS"));
        assert!(!text.contains("SUMMARY"));
        assert!(!text.contains("EXPERIENCE"));
    }

    #[test]
    fn test_section_order_is_respected() {
        let options = PlainTextOptions {
            section_order: Some(vec!["skills".to_string(), "summary".to_string()]),
            include_sections: None,
        };
        let text = resume_to_plain_text(&sample_resume(), &options);
        let skills_at = text.find("SKILLS").unwrap();
        let summary_at = text.find("SUMMARY").unwrap();
        assert!(skills_at < summary_at);
    }

    #[test]
    fn test_format_date_range_omits_empty_sides() {
        assert_eq!(format_date_range("", ""), "");
        assert_eq!(format_date_range("Jan 2020", ""), "Jan 2020");
        assert_eq!(format_date_range("", "Dec 2022"), "Dec 2022");
        assert_eq!(format_date_range("Jan 2020", "Dec 2022"), "Jan 2020 - Dec 2022");
    }

    #[test]
    fn test_empty_resume_serializes_to_empty_string() {
        assert_eq!(
            resume_to_plain_text(&Resume::default(), &PlainTextOptions::default()),
            ""
        );
    }
}
