//! Application services and ports.

#![forbid(unsafe_code)]

mod generation_service;
mod rate_limit_service;

pub use generation_service::{GenerationService, TextGenerator};
pub use rate_limit_service::{AttemptInfo, RateLimitRule, RateLimitService, RateLimitStore};
