//! Axum route handlers for the tailoring API. Both endpoints call the
//! completion service, so both sit behind the rate limiter.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::state::AppState;
use crate::tailoring::cover_letter::{generate_cover_letter, CoverLetterOptions};
use crate::tailoring::tailor::{tailor_resume, TailorInput, TailoredOutput};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub resume: Resume,
    pub job_description: String,
    #[serde(default)]
    pub section_order: Vec<String>,
    #[serde(default)]
    pub include_sections: Vec<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume: Resume,
    pub job_description: String,
    #[serde(default)]
    pub options: CoverLetterOptions,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub letter: String,
}

fn client_key(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("local")
}

/// POST /api/v1/tailor
///
/// Full tailoring pipeline: keyword reorder, fact-locked summary rewrite,
/// section visibility, match score, change log.
pub async fn handle_tailor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailoredOutput>, AppError> {
    if !state
        .limiter
        .allow(&format!("customize:{}", client_key(&headers)))
    {
        return Err(AppError::RateLimited);
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resume or job description.".to_string(),
        ));
    }

    let output = tailor_resume(
        state.llm.as_ref(),
        TailorInput {
            resume: request.resume,
            job_description: request.job_description,
            section_order: request.section_order,
            include_sections: request.include_sections,
            raw_text: request.raw_text,
        },
    )
    .await;

    Ok(Json(output))
}

/// POST /api/v1/cover-letter
///
/// Drafts a cover letter with the same no-fabrication verification as the
/// summary rewrite; falls back to the deterministic template.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if !state
        .limiter
        .allow(&format!("cover:{}", client_key(&headers)))
    {
        return Err(AppError::RateLimited);
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resume or job description.".to_string(),
        ));
    }

    let letter = generate_cover_letter(
        state.llm.as_ref(),
        &request.resume,
        &request.job_description,
        request.options,
    )
    .await;

    Ok(Json(CoverLetterResponse { letter }))
}
