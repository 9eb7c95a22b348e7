mod ats;
mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod rate_limit;
mod resume;
mod routes;
mod state;
mod tailoring;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::ChatClient;
use crate::rate_limit::TokenBucketLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Completion client — disabled when no API key is configured; every
    // generation path then runs its deterministic fallback.
    let llm = ChatClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    );
    if llm.is_enabled() {
        info!("Completion client initialized (model: {})", config.openai_model);
    } else {
        info!("Completion client disabled — deterministic fallbacks only");
    }

    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        limiter: Arc::new(TokenBucketLimiter::new()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
