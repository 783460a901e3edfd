//! Achievement generation endpoint.

use axum::Json;
use axum::extract::State;
use unlockery_domain::{GenerationRequest, LanguageDirective};

use crate::dto::{GenerateAchievementsRequest, GenerateAchievementsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Generates fake achievements for the supplied name and category.
///
/// Rate limiting runs before this handler as a route layer. Validation
/// failures map to 400, a missing upstream credential and upstream failures
/// to 500; an empty achievements array is a successful response.
pub async fn generate_achievements_handler(
    State(state): State<AppState>,
    Json(payload): Json<GenerateAchievementsRequest>,
) -> ApiResult<Json<GenerateAchievementsResponse>> {
    let request = GenerationRequest::new(
        &payload.name,
        &payload.category,
        payload.number.as_ref(),
        payload.absurdity.as_deref(),
    )?;
    let language = LanguageDirective::resolve(
        payload.language.as_deref(),
        payload.language_prompt.as_deref(),
    );

    let achievements = state
        .generation_service
        .generate_achievements(&request, language.as_ref())
        .await?;

    Ok(Json(GenerateAchievementsResponse {
        achievements: achievements.into_iter().map(String::from).collect(),
    }))
}
