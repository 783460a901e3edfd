//! Shared application state.

use unlockery_application::{GenerationService, RateLimitService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrates prompt-build, the upstream call, and response parsing.
    pub generation_service: GenerationService,
    /// Fixed-window admission control keyed by client address.
    pub rate_limit_service: RateLimitService,
}
