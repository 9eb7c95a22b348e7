pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats;
use crate::matching;
use crate::resume;
use crate::state::AppState;
use crate::tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume ingestion + preview
        .route(
            "/api/v1/resumes/parse",
            post(resume::handlers::handle_parse_upload),
        )
        .route(
            "/api/v1/resumes/parse-text",
            post(resume::handlers::handle_parse_text),
        )
        .route(
            "/api/v1/resumes/plaintext",
            post(resume::handlers::handle_plain_text),
        )
        // Scoring
        .route(
            "/api/v1/match/score",
            post(matching::handlers::handle_match_score),
        )
        .route("/api/v1/ats/score", post(ats::handlers::handle_ats_score))
        // Tailoring (rate limited)
        .route("/api/v1/tailor", post(tailoring::handlers::handle_tailor))
        .route(
            "/api/v1/cover-letter",
            post(tailoring::handlers::handle_cover_letter),
        )
        .with_state(state)
}
