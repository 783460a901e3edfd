//! Gemini-backed implementation of the text generation port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use unlockery_application::TextGenerator;
use unlockery_core::{AppError, AppResult};

/// Default base endpoint of the generative language API.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model used for achievement generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for the Gemini `generateContent` call.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential. Absence is not a startup error; it is surfaced per
    /// call as a configuration error so a keyless deployment still boots.
    pub api_key: Option<String>,
    /// Base endpoint of the generative language API.
    pub endpoint: Url,
    /// Model identifier appended to the endpoint path.
    pub model: String,
}

/// HTTP adapter for the Gemini `generateContent` endpoint.
///
/// Issues exactly one best-effort call per `generate` invocation: no retry,
/// no timeout override beyond the transport defaults.
pub struct GeminiTextGenerator {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiTextGenerator {
    /// Creates a generator with a shared HTTP client and connection config.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: GeminiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn request_url(&self) -> AppResult<Url> {
        self.config
            .endpoint
            .join(&format!(
                "/v1beta/models/{}:generateContent",
                self.config.model
            ))
            .map_err(|error| {
                AppError::Configuration(format!("invalid generation endpoint: {error}"))
            })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// An absent or partial candidate structure is tolerated as empty text; only
// a body that is not JSON at all counts as an upstream failure.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default()
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str, temperature: f32) -> AppResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("Server misconfiguration: missing Gemini API key".to_owned())
        })?;

        let url = self.request_url()?;
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .http_client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|error| AppError::Upstream(format!("generation request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Upstream(format!(
                "generation request returned status {status}: {detail}"
            )));
        }

        let decoded: GenerateContentResponse = response.json().await.map_err(|error| {
            AppError::Upstream(format!("failed to decode generation response: {error}"))
        })?;
        debug!(
            candidates = decoded.candidates.len(),
            "generation response decoded"
        );

        Ok(extract_text(decoded))
    }
}
