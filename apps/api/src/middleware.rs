//! Request middleware for the API.

use axum::Extension;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use unlockery_application::RateLimitRule;

use crate::error::ApiResult;
use crate::state::AppState;

/// Client key used when the request carries no identifying address; all
/// anonymous clients share one bucket.
const ANONYMOUS_CLIENT_KEY: &str = "unknown";

/// Fixed-window rate limiting keyed by client address.
///
/// Applied as a route layer so the check runs before body handling.
pub async fn rate_limit(
    State(state): State<AppState>,
    Extension(rule): Extension<RateLimitRule>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let client_key = extract_client_key(request.headers());
    state
        .rate_limit_service
        .check_rate_limit(&rule, &client_key)
        .await?;

    Ok(next.run(request).await)
}

fn extract_client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| ANONYMOUS_CLIENT_KEY.to_owned())
}
