//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod gemini_text_generator;
mod in_memory_rate_limit_store;

pub use gemini_text_generator::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiConfig, GeminiTextGenerator,
};
pub use in_memory_rate_limit_store::InMemoryRateLimitStore;
