//! Localization module for SearchChat-RS
//!
//! Instructions, prompt labels and user-facing messages live in Fluent
//! resources embedded at build time.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Supported languages
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[("tr", "Türkçe"), ("en", "English")];

/// Language used when a message is missing or the locale is unsupported
pub const FALLBACK_LANGUAGE: &str = "en";

/// Message ids
pub mod keys {
    pub const SERVICE_NAME: &str = "service-name";
    pub const BASE_INSTRUCTIONS: &str = "base-instructions";
    pub const SEARCH_HEADING: &str = "search-heading";
    pub const SEARCH_SOURCE_LABEL: &str = "search-source-label";
    pub const SEARCH_SUMMARY_LABEL: &str = "search-summary-label";
    pub const SEARCH_FOOTER: &str = "search-footer";
    pub const ERROR_APOLOGY: &str = "error-apology";
    pub const ERROR_HISTORY: &str = "error-history";
    pub const ERROR_DELETE: &str = "error-delete";
}

fn resource_source(code: &str) -> Option<&'static str> {
    match code {
        "tr" => Some(include_str!("tr.ftl")),
        "en" => Some(include_str!("en.ftl")),
        _ => None,
    }
}

/// Reduce a language tag like "tr-TR" to a supported base code
pub fn resolve_language(code: &str) -> Option<&'static str> {
    let base = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == base)
        .map(|(c, _)| *c)
}

type Bundle = FluentBundle<FluentResource>;

fn build_bundle(code: &str) -> Result<Bundle> {
    let source = resource_source(code).ok_or_else(|| anyhow!("no resources for {}", code))?;
    let langid: LanguageIdentifier = code.parse()?;

    let resource = FluentResource::try_new(source.to_string())
        .map_err(|(_, errors)| anyhow!("invalid {} resource: {:?}", code, errors))?;

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| anyhow!("failed to load {} resource: {:?}", code, errors))?;

    Ok(bundle)
}

fn format_message(bundle: &Bundle, key: &str) -> Option<String> {
    let message = bundle.get_message(key)?;
    let pattern = message.value()?;
    let mut errors = vec![];
    let value = bundle.format_pattern(pattern, None, &mut errors);
    if !errors.is_empty() {
        warn!("Errors formatting message {}: {:?}", key, errors);
    }
    Some(value.into_owned())
}

/// Translation lookup for one language, with English fallback
pub struct Translations {
    language: &'static str,
    bundle: Bundle,
    fallback: Option<Bundle>,
}

impl Translations {
    /// Load translations for a language; unsupported languages fall back to English
    pub fn new(language: &str) -> Result<Self> {
        let resolved = match resolve_language(language) {
            Some(code) => code,
            None => {
                warn!(
                    "Unsupported locale '{}', falling back to {}",
                    language, FALLBACK_LANGUAGE
                );
                FALLBACK_LANGUAGE
            }
        };

        let bundle = build_bundle(resolved)?;
        let fallback = if resolved == FALLBACK_LANGUAGE {
            None
        } else {
            Some(build_bundle(FALLBACK_LANGUAGE)?)
        };

        Ok(Self {
            language: resolved,
            bundle,
            fallback,
        })
    }

    /// Active language code
    pub fn language(&self) -> &str {
        self.language
    }

    /// Look up a message; falls back to English, then to the key itself
    pub fn get(&self, key: &str) -> String {
        format_message(&self.bundle, key)
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .and_then(|fallback| format_message(fallback, key))
            })
            .unwrap_or_else(|| key.to_string())
    }
}
