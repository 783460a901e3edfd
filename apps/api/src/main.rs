//! Unlockery API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use tracing::{info, warn};
use unlockery_application::{GenerationService, RateLimitService};
use unlockery_core::AppError;
use unlockery_infrastructure::{GeminiTextGenerator, InMemoryRateLimitStore};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is configured");
    }

    // Rate limit state is constructed once per process and torn down with it.
    let rate_limit_store = Arc::new(InMemoryRateLimitStore::new());
    let rate_limit_service = RateLimitService::new(rate_limit_store);

    let http_client = reqwest::Client::new();
    let generator = Arc::new(GeminiTextGenerator::new(http_client, config.gemini.clone()));
    let generation_service = GenerationService::new(generator);

    let app_state = AppState {
        generation_service,
        rate_limit_service,
    };

    let app = api_router::build_router(app_state, &config.frontend_url, &config.static_assets_dir)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "unlockery-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
