//! Achievement generation ports and application service.

use std::sync::Arc;

use async_trait::async_trait;

use unlockery_core::AppResult;
use unlockery_domain::{
    Achievement, GenerationRequest, LanguageDirective, build_prompt, parse_achievements,
};

/// Port for the external generative-text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issues exactly one generation call and returns the raw model text.
    ///
    /// Fails with `AppError::Configuration` when no credential is available
    /// and with `AppError::Upstream` on transport or protocol failures.
    async fn generate(&self, prompt: &str, temperature: f32) -> AppResult<String>;
}

/// Application service orchestrating the generation pipeline:
/// prompt-build, a single upstream call, and response parsing.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationService {
    /// Creates a new generation service.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generates achievements for a validated request.
    ///
    /// Performs at most one upstream call; no retry. An empty result is a
    /// valid outcome the caller must handle, not an error.
    pub async fn generate_achievements(
        &self,
        request: &GenerationRequest,
        language: Option<&LanguageDirective>,
    ) -> AppResult<Vec<Achievement>> {
        let prompt = build_prompt(request, language);
        let temperature = request.absurdity().temperature();
        let raw = self.generator.generate(&prompt, temperature).await?;

        Ok(parse_achievements(&raw))
    }
}
