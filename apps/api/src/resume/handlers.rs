//! Axum route handlers for resume ingestion and preview serialization.

use axum::extract::Multipart;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::{ParsedDocument, Resume};
use crate::resume::extract::{document_from_docx, document_from_pdf, document_from_text};
use crate::resume::plaintext::{resume_to_plain_text, PlainTextOptions};

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainTextRequest {
    pub resume: Resume,
    #[serde(default)]
    pub section_order: Option<Vec<String>>,
    #[serde(default)]
    pub include_sections: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct PlainTextResponse {
    pub text: String,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload of a PDF or DOCX resume. Extraction failures are
/// reported as warnings on the parsed document, never as request errors.
pub async fn handle_parse_upload(
    mut multipart: Multipart,
) -> Result<Json<ParsedDocument>, AppError> {
    let mut upload: Option<(String, String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(format!("Invalid multipart payload: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::Internal(anyhow::anyhow!("Failed to read upload: {err}")))?;
        upload = Some((filename, content_type, bytes));
        break;
    }

    let Some((filename, content_type, bytes)) = upload else {
        return Err(AppError::Validation("Missing file upload.".to_string()));
    };

    let is_pdf = content_type == "application/pdf" || filename.ends_with(".pdf");
    let is_docx = content_type == DOCX_MIME || filename.ends_with(".docx");
    if !is_pdf && !is_docx {
        return Err(AppError::UnsupportedMedia(
            "Unsupported file type. Upload a PDF or DOCX.".to_string(),
        ));
    }

    let document = if is_pdf {
        document_from_pdf(&bytes)
    } else {
        document_from_docx(&bytes)
    };
    Ok(Json(document))
}

/// POST /api/v1/resumes/parse-text
///
/// Pasted resume text in, structured resume out.
pub async fn handle_parse_text(
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ParsedDocument>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Missing resume text.".to_string()));
    }
    Ok(Json(document_from_text(&request.text)))
}

/// POST /api/v1/resumes/plaintext
///
/// Serializes a resume the way the rendering layer will, honoring section
/// order and visibility. Used for previews.
pub async fn handle_plain_text(
    Json(request): Json<PlainTextRequest>,
) -> Result<Json<PlainTextResponse>, AppError> {
    let options = PlainTextOptions {
        section_order: request.section_order,
        include_sections: request.include_sections,
    };
    Ok(Json(PlainTextResponse {
        text: resume_to_plain_text(&request.resume, &options),
    }))
}
