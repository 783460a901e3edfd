//! Prompt construction for the external generation model.

use std::fmt::Write as _;

use crate::request::GenerationRequest;

/// Language code that needs no output directive.
pub const DEFAULT_LANGUAGE: &str = "en";

/// An explicit output-language instruction for the model.
///
/// Present only when the client asked for a non-default language and
/// supplied a human-readable language label for the prompt.
#[derive(Debug, Clone)]
pub struct LanguageDirective(String);

impl LanguageDirective {
    /// Resolves the optional client language fields into a directive.
    #[must_use]
    pub fn resolve(language: Option<&str>, prompt_label: Option<&str>) -> Option<Self> {
        let label = prompt_label?.trim();
        if label.is_empty() || language == Some(DEFAULT_LANGUAGE) {
            return None;
        }

        Some(Self(label.to_owned()))
    }

    /// Returns the language label as supplied by the client.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Assembles the model instruction for a validated request.
///
/// Deterministic given identical inputs. The directive, when present, is
/// prepended so it dominates the rest of the instruction.
#[must_use]
pub fn build_prompt(request: &GenerationRequest, language: Option<&LanguageDirective>) -> String {
    let mut prompt = String::new();

    if let Some(directive) = language {
        let _ = writeln!(
            prompt,
            "ALL OUTPUT MUST BE IN {}.",
            directive.as_str().to_uppercase()
        );
    }

    let _ = write!(
        prompt,
        "Generate {count} funny, absurd and ridiculous achievements in the format:\n\
         \"{name} unlocked: [ACHIEVEMENT NAME] — [DESCRIPTION]\"\n\
         Make the achievements themed around \"{category}\" and tailored to the selected absurdity level: \"{absurdity}\".\n\
         Make them creative, funny, and shareable. Do not use markdown or asterisks for bold. Output in plain text only.",
        count = request.count().get(),
        name = request.recipient().as_str(),
        category = request.category().as_str(),
        absurdity = request.absurdity().label(),
    );

    prompt
}
