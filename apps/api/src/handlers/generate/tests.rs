use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use unlockery_application::{GenerationService, RateLimitService, TextGenerator};
use unlockery_core::{AppError, AppResult};
use unlockery_infrastructure::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiConfig, GeminiTextGenerator,
    InMemoryRateLimitStore,
};

use crate::api_router::build_router;
use crate::state::AppState;

struct CannedGenerator(String);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> AppResult<String> {
        Ok(self.0.clone())
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> AppResult<String> {
        Err(AppError::Upstream("connection refused".to_owned()))
    }
}

fn router_with_generator(generator: Arc<dyn TextGenerator>) -> Router {
    let state = AppState {
        generation_service: GenerationService::new(generator),
        rate_limit_service: RateLimitService::new(Arc::new(InMemoryRateLimitStore::new())),
    };

    match build_router(state, "http://localhost:3001", Path::new("static")) {
        Ok(router) => router,
        Err(error) => panic!("router must build: {error}"),
    }
}

fn keyless_gemini_router() -> Router {
    let endpoint = match url::Url::parse(DEFAULT_GEMINI_ENDPOINT) {
        Ok(url) => url,
        Err(error) => panic!("default endpoint must parse: {error}"),
    };
    let generator = GeminiTextGenerator::new(
        reqwest::Client::new(),
        GeminiConfig {
            api_key: None,
            endpoint,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
        },
    );

    router_with_generator(Arc::new(generator))
}

async fn post_generate(router: Router, body: &Value) -> (StatusCode, Value) {
    let request = match Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "9.9.9.9")
        .body(Body::from(body.to_string()))
    {
        Ok(request) => request,
        Err(error) => panic!("request must build: {error}"),
    };

    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let status = response.status();
    let bytes = match response.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(error) => panic!("body must collect: {error}"),
    };
    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(error) => panic!("body must be JSON: {error}"),
    };

    (status, payload)
}

#[tokio::test]
async fn generate_returns_the_parsed_achievement_lines() {
    let router = router_with_generator(Arc::new(CannedGenerator(
        "Al unlocked: X — Y\n\nAl unlocked: Z\nnot a line\n".to_owned(),
    )));

    let (status, payload) = post_generate(
        router,
        &json!({"name": "Al", "category": "chess", "number": 3, "absurdity": "High"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        json!({"achievements": ["Al unlocked: X — Y", "Al unlocked: Z"]})
    );
}

#[tokio::test]
async fn generate_accepts_unusable_output_as_an_empty_array() {
    let router = router_with_generator(Arc::new(CannedGenerator(
        "the model had nothing to say".to_owned(),
    )));

    let (status, payload) =
        post_generate(router, &json!({"name": "Al", "category": "chess"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!({"achievements": []}));
}

#[tokio::test]
async fn generate_rejects_a_missing_name() {
    let router = router_with_generator(Arc::new(CannedGenerator(String::new())));

    let (status, payload) = post_generate(
        router,
        &json!({"name": "", "category": "chess", "number": 3, "absurdity": "High"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn generate_rejects_input_that_sanitizes_to_nothing() {
    let router = router_with_generator(Arc::new(CannedGenerator(String::new())));

    let (status, payload) =
        post_generate(router, &json!({"name": "@#$%", "category": "chess"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn generate_coerces_count_and_absurdity_instead_of_rejecting() {
    let router = router_with_generator(Arc::new(CannedGenerator(
        "Al unlocked: X — Y".to_owned(),
    )));

    let (status, _payload) = post_generate(
        router,
        &json!({"name": "Al", "category": "chess", "number": "abc", "absurdity": "extreme"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn the_eleventh_request_in_a_window_is_rate_limited() {
    let router = router_with_generator(Arc::new(CannedGenerator(
        "Al unlocked: X — Y".to_owned(),
    )));
    let body = json!({"name": "Al", "category": "chess"});

    for _ in 0..10 {
        let (status, _payload) = post_generate(router.clone(), &body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, payload) = post_generate(router, &body).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(payload, json!({"error": "Rate limit exceeded"}));
}

#[tokio::test]
async fn a_missing_credential_is_a_server_misconfiguration() {
    let (status, payload) = post_generate(
        keyless_gemini_router(),
        &json!({"name": "Al", "category": "chess"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        payload,
        json!({"error": "Server misconfiguration: missing Gemini API key"})
    );
}

#[tokio::test]
async fn upstream_failures_surface_as_a_generic_error() {
    let router = router_with_generator(Arc::new(FailingGenerator));

    let (status, payload) =
        post_generate(router, &json!({"name": "Al", "category": "chess"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, json!({"error": "Failed to generate achievements"}));
}

#[tokio::test]
async fn health_probe_answers_ok() {
    let router = router_with_generator(Arc::new(CannedGenerator(String::new())));

    let request = match Request::builder().uri("/health").body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("request must build: {error}"),
    };
    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    assert_eq!(response.status(), StatusCode::OK);
}
