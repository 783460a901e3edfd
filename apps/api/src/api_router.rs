//! Router assembly for the API process.

use std::path::Path;

use axum::Extension;
use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use unlockery_application::RateLimitRule;
use unlockery_core::AppError;

use crate::state::AppState;
use crate::{handlers, middleware};

/// Requests allowed per client key within one window.
const GENERATE_RATE_LIMIT: i32 = 10;

/// Rate limit window in seconds.
const GENERATE_RATE_WINDOW_SECONDS: i64 = 10 * 60;

/// Builds the full application router: the rate-limited generation API, the
/// health probe, and the static browser UI for every other path.
pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    static_assets_dir: &Path,
) -> Result<Router, AppError> {
    let generate_rate_rule = RateLimitRule::new(
        "generate",
        GENERATE_RATE_LIMIT,
        GENERATE_RATE_WINDOW_SECONDS,
    );

    let generate_routes = Router::new()
        .route(
            "/api/generate",
            post(handlers::generate::generate_achievements_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::rate_limit,
        ))
        .layer(Extension(generate_rate_rule));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let static_site = ServeDir::new(static_assets_dir)
        .fallback(ServeFile::new(static_assets_dir.join("index.html")));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(generate_routes)
        .fallback_service(static_site)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
