//! Generation request value types and input sanitization rules.

use std::fmt::{Display, Formatter};

use serde_json::Value;
use unlockery_core::{AppError, AppResult};

/// Maximum character length for the recipient name and category inputs.
pub const MAX_INPUT_LENGTH: usize = 32;

const MISSING_FIELDS: &str = "Missing required fields";

/// Strips every character outside the allow-set, trims surrounding
/// whitespace, and truncates to `max_len` characters.
///
/// The allow-set is ASCII word characters, whitespace, hyphen, period,
/// comma, apostrophe, and exclamation mark. Total function: fully
/// disallowed input yields an empty string.
#[must_use]
pub fn sanitize(input: &str, max_len: usize) -> String {
    let filtered: String = input.chars().filter(|c| is_allowed(*c)).collect();
    filtered.trim().chars().take(max_len).collect()
}

fn is_allowed(character: char) -> bool {
    character.is_ascii_alphanumeric()
        || character == '_'
        || character.is_whitespace()
        || matches!(character, '-' | '.' | ',' | '\'' | '!')
}

/// Sanitized, non-empty name the achievements are addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientName(String);

impl RecipientName {
    /// Sanitizes the raw input and validates that something is left.
    pub fn new(raw: &str) -> AppResult<Self> {
        let value = sanitize(raw, MAX_INPUT_LENGTH);
        if value.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the sanitized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Sanitized, non-empty theme the achievements revolve around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementCategory(String);

impl AchievementCategory {
    /// Sanitizes the raw input and validates that something is left.
    pub fn new(raw: &str) -> AppResult<Self> {
        let value = sanitize(raw, MAX_INPUT_LENGTH);
        if value.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the sanitized category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Tone dial for the generated achievements, mapped to a sampling
/// temperature for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absurdity {
    /// Mild, almost plausible achievements.
    Low,
    /// The default middle ground.
    Medium,
    /// Fully unhinged achievements.
    High,
}

impl Absurdity {
    /// Resolves a client-supplied label, silently falling back to
    /// [`Absurdity::Medium`] for anything outside the enumerated set.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Low") => Self::Low,
            Some("High") => Self::High,
            _ => Self::Medium,
        }
    }

    /// Returns the generation temperature for this level.
    #[must_use]
    pub fn temperature(self) -> f32 {
        match self {
            Self::Low => 0.4,
            Self::Medium => 0.7,
            Self::High => 1.2,
        }
    }

    /// Returns the canonical label used in prompts and the API.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Absurdity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.label())
    }
}

/// How many achievements a request asks for, clamped to [1, 10].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementCount(u8);

impl AchievementCount {
    /// Fallback used when the client sends nothing usable.
    pub const DEFAULT: u8 = 5;

    /// Coerces an arbitrary JSON value into a valid count.
    ///
    /// Numbers and numeric strings inside [1, 10] are taken as-is; anything
    /// else (absent, non-numeric, fractional, out of range) silently becomes
    /// [`AchievementCount::DEFAULT`]. This leniency mirrors the API contract
    /// and is deliberate, not a validation gap.
    #[must_use]
    pub fn coerce(value: Option<&Value>) -> Self {
        let requested = match value {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        };

        match requested {
            Some(n) if (1.0..=10.0).contains(&n) && n.fract() == 0.0 => Self(n as u8),
            _ => Self(Self::DEFAULT),
        }
    }

    /// Returns the count value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for AchievementCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// A validated, request-scoped achievement generation order.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    recipient: RecipientName,
    category: AchievementCategory,
    count: AchievementCount,
    absurdity: Absurdity,
}

impl GenerationRequest {
    /// Builds a validated request from raw client input.
    ///
    /// `name` and `category` are sanitized and must be non-empty afterwards;
    /// `number` and `absurdity` are coerced leniently and never fail.
    pub fn new(
        name: &str,
        category: &str,
        number: Option<&Value>,
        absurdity: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            recipient: RecipientName::new(name)?,
            category: AchievementCategory::new(category)?,
            count: AchievementCount::coerce(number),
            absurdity: Absurdity::from_label(absurdity),
        })
    }

    /// The sanitized recipient name.
    #[must_use]
    pub fn recipient(&self) -> &RecipientName {
        &self.recipient
    }

    /// The sanitized category.
    #[must_use]
    pub fn category(&self) -> &AchievementCategory {
        &self.category
    }

    /// The coerced achievement count.
    #[must_use]
    pub fn count(&self) -> AchievementCount {
        self.count
    }

    /// The coerced absurdity level.
    #[must_use]
    pub fn absurdity(&self) -> Absurdity {
        self.absurdity
    }
}
