//! Structured resume record and the parsed-document envelope around it.
//!
//! All sequences deserialize to empty when absent so downstream consumers
//! never see implicit nullability. Wire format is camelCase to match the
//! web client contract.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub name: String,
    pub title: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub bullets: Vec<String>,
}

/// The structured resume recovered from free-form text.
///
/// Invariant: sequences never contain empty-after-trim strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub contact: Contact,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Heuristic proxy for image-only/scanned sources: true iff the
    /// whitespace-stripped character count is below 80.
    pub is_scanned: bool,
    pub text_length: usize,
    pub file_type: FileType,
}

/// Extraction result handed back to the client: the raw text, the structured
/// resume parsed out of it, and any extraction warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub resume: Resume,
    pub raw_text: String,
    pub warnings: Vec<String>,
    pub file_meta: FileMeta,
}
