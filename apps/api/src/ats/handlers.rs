//! Axum route handler for the ATS format check.

use axum::Json;

use crate::ats::{score_ats_format, AtsScore, AtsScoreInput};
use crate::errors::AppError;

/// POST /api/v1/ats/score
///
/// Rule-based formatting scan over raw resume text plus optional file
/// metadata from extraction.
pub async fn handle_ats_score(
    Json(request): Json<AtsScoreInput>,
) -> Result<Json<AtsScore>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("Missing rawText.".to_string()));
    }
    Ok(Json(score_ats_format(&request)))
}
