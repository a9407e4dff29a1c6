//! Search result models

use serde::{Deserialize, Serialize};

/// A single web search result, in provider (relevance) order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Short host-like label shown as the source
    pub display_link: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
        display_link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            display_link: display_link.into(),
        }
    }

    /// Project to the subset persisted on an assistant message
    pub fn to_source(&self) -> Source {
        Source {
            title: self.title.clone(),
            url: self.link.clone(),
            snippet: self.snippet.clone(),
        }
    }
}

/// A cited source attached to an assistant message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Outcome of a best-effort search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one result
    Results(Vec<SearchResult>),
    /// The provider answered but found nothing
    Empty,
    /// Transport, HTTP or parse failure; the reason is diagnostic only
    Unavailable(String),
}

impl SearchOutcome {
    /// Build an outcome from a result list
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            Self::Empty
        } else {
            Self::Results(results)
        }
    }

    /// Results, empty when the search found nothing or failed
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Results(results) => results,
            Self::Empty | Self::Unavailable(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Results(results) => results.len(),
            Self::Empty | Self::Unavailable(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Failure reason, if the provider was unavailable
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }
}
