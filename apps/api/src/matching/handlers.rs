//! Axum route handlers for the matching API.

use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::scorer::{compute_match_score, MatchScore};
use crate::models::resume::Resume;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreRequest {
    pub resume: Resume,
    pub job_description: String,
}

/// POST /api/v1/match/score
///
/// Scores a structured resume against a job description. Surfaces missing
/// keywords so the user can tailor before exporting.
pub async fn handle_match_score(
    Json(request): Json<MatchScoreRequest>,
) -> Result<Json<MatchScore>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resume or job description.".to_string(),
        ));
    }
    Ok(Json(compute_match_score(
        &request.resume,
        &request.job_description,
    )))
}
