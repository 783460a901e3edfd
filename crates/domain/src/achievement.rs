//! Achievement lines and raw model output parsing.

use serde::Serialize;

/// Substring every valid achievement line must contain.
pub const ACHIEVEMENT_MARKER: &str = "unlocked:";

/// A single generated achievement line of the form
/// `"<Name> unlocked: <Title> — <Description>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Achievement(String);

impl Achievement {
    /// Returns the achievement text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Achievement> for String {
    fn from(value: Achievement) -> Self {
        value.0
    }
}

/// Splits raw model output into discrete achievement lines.
///
/// Lines are trimmed; empty lines and lines without the
/// [`ACHIEVEMENT_MARKER`] substring are dropped. An empty result is valid
/// and must be handled by the caller.
#[must_use]
pub fn parse_achievements(raw: &str) -> Vec<Achievement> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains(ACHIEVEMENT_MARKER))
        .map(|line| Achievement(line.to_owned()))
        .collect()
}
