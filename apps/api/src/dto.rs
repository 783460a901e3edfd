//! Request and response payloads for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
///
/// `number` stays untyped on purpose: out-of-range, fractional, or
/// non-numeric values silently fall back to the default count instead of
/// failing deserialization, and unknown absurdity labels fall back to
/// Medium. This leniency is part of the API contract.
#[derive(Debug, Deserialize)]
pub struct GenerateAchievementsRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub number: Option<serde_json::Value>,
    #[serde(default)]
    pub absurdity: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "languagePrompt")]
    pub language_prompt: Option<String>,
}

/// Successful response of `POST /api/generate`. The array may be empty.
#[derive(Debug, Serialize)]
pub struct GenerateAchievementsResponse {
    pub achievements: Vec<String>,
}

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
