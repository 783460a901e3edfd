//! Shared primitives for all Rust crates in Unlockery.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Unlockery crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Client exceeded its request budget for the current window.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Required deployment configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external generation service failed or answered unusably.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the message carried by the error, without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::RateLimited(message)
            | Self::Configuration(message)
            | Self::Upstream(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_includes_category_prefix() {
        let error = AppError::Upstream("connection reset".to_owned());
        assert_eq!(error.to_string(), "upstream error: connection reset");
    }

    #[test]
    fn message_strips_category_prefix() {
        let error = AppError::RateLimited("Rate limit exceeded".to_owned());
        assert_eq!(error.message(), "Rate limit exceeded");
    }
}
