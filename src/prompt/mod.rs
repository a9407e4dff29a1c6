//! System prompt composition
//!
//! Builds the instruction block sent to the language model, embedding
//! search results as a numbered "current information" section.

use crate::locales::{keys, Translations};
use crate::search::SearchResult;

/// Localized pieces of the search section
#[derive(Debug, Clone)]
struct SectionLabels {
    heading: String,
    source: String,
    summary: String,
    footer: String,
}

/// Builds the system prompt for a turn
#[derive(Debug, Clone)]
pub struct PromptComposer {
    base_instructions: String,
    labels: SectionLabels,
}

impl PromptComposer {
    pub fn new(translations: &Translations) -> Self {
        Self {
            base_instructions: translations.get(keys::BASE_INSTRUCTIONS),
            labels: SectionLabels {
                heading: translations.get(keys::SEARCH_HEADING),
                source: translations.get(keys::SEARCH_SOURCE_LABEL),
                summary: translations.get(keys::SEARCH_SUMMARY_LABEL),
                footer: translations.get(keys::SEARCH_FOOTER),
            },
        }
    }

    /// The fixed policy block
    pub fn base_instructions(&self) -> &str {
        &self.base_instructions
    }

    /// Append a numbered section for `results`, in the given order.
    ///
    /// With no results the base instructions are returned unchanged.
    pub fn compose(&self, base_instructions: &str, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return base_instructions.to_string();
        }

        let mut prompt = String::from(base_instructions);
        prompt.push_str("\n\n");
        prompt.push_str(&self.labels.heading);
        prompt.push('\n');

        for (i, result) in results.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, result.title));
            prompt.push_str(&format!(
                "   {}: {}\n",
                self.labels.source, result.display_link
            ));
            prompt.push_str(&format!(
                "   {}: {}\n\n",
                self.labels.summary, result.snippet
            ));
        }

        prompt.push_str(&self.labels.footer);
        prompt
    }

    /// Compose over the built-in base instructions
    pub fn system_prompt(&self, results: &[SearchResult]) -> String {
        self.compose(&self.base_instructions, results)
    }
}
