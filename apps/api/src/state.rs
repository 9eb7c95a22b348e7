use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum
/// extractors. Collaborators sit behind traits so tests can script them.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text-completion collaborator; unavailable means deterministic
    /// fallbacks everywhere.
    pub llm: Arc<dyn CompletionService>,
    /// Per-key token-bucket limiter guarding the generation endpoints.
    pub limiter: Arc<dyn RateLimiter>,
}
