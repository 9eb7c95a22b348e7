//! Best-effort document extraction: PDF, DOCX, or pasted text in, a
//! `ParsedDocument` out. Extraction failures degrade to an empty-text
//! document with a warning so downstream scoring can still report.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

use crate::models::resume::{FileMeta, FileType, ParsedDocument};
use crate::resume::parser::parse_resume_from_text;

/// Below this many non-whitespace characters the source is treated as a
/// scanned/image-only file.
const SCANNED_TEXT_THRESHOLD: usize = 80;

const SCANNED_WARNING: &str =
    "Low text extraction detected. This may be a scanned PDF or image-based file.";

static XML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

pub fn document_from_pdf(bytes: &[u8]) -> ParsedDocument {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => build_parsed_document(&text, FileType::Pdf, Vec::new()),
        Err(err) => {
            warn!("PDF text extraction failed: {err}");
            build_parsed_document(
                "",
                FileType::Pdf,
                vec![format!("Could not extract text from the PDF: {err}")],
            )
        }
    }
}

pub fn document_from_docx(bytes: &[u8]) -> ParsedDocument {
    match docx_raw_text(bytes) {
        Ok(text) => build_parsed_document(&text, FileType::Docx, Vec::new()),
        Err(err) => {
            warn!("DOCX text extraction failed: {err:#}");
            build_parsed_document(
                "",
                FileType::Docx,
                vec![format!("Could not extract text from the DOCX: {err:#}")],
            )
        }
    }
}

pub fn document_from_text(text: &str) -> ParsedDocument {
    build_parsed_document(text, FileType::Text, Vec::new())
}

fn build_parsed_document(
    raw_text: &str,
    file_type: FileType,
    mut warnings: Vec<String>,
) -> ParsedDocument {
    let normalized = raw_text.replace("\r\n", "\n").trim().to_string();
    let text_length = normalized.chars().filter(|c| !c.is_whitespace()).count();
    let is_scanned = text_length < SCANNED_TEXT_THRESHOLD;
    if is_scanned {
        warnings.push(SCANNED_WARNING.to_string());
    }

    let resume = parse_resume_from_text(&normalized);
    ParsedDocument {
        resume,
        raw_text: normalized,
        warnings,
        file_meta: FileMeta {
            is_scanned,
            text_length,
            file_type,
        },
    }
}

/// Reads `word/document.xml` out of the DOCX container and strips the
/// WordprocessingML markup down to plain text.
fn docx_raw_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("not a valid DOCX container")?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("unreadable document body")?;
    Ok(strip_document_xml(&xml))
}

fn strip_document_xml(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");
    let stripped = XML_TAG.replace_all(&with_breaks, "");
    decode_xml_entities(&stripped)
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
