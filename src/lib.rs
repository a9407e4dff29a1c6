//! SearchChat-RS: a conversational backend with live web-search augmentation
//!
//! Each turn decides whether the user's message needs current information,
//! fetches search results when it does, folds them into the system prompt,
//! and asks a hosted language model for the reply. Conversations are kept
//! in a document store keyed by session.

pub mod chat;
pub mod config;
pub mod llm;
pub mod locales;
pub mod network;
pub mod prompt;
pub mod search;
pub mod store;
pub mod web;

pub use chat::{ChatResponse, ConversationOrchestrator, Message, Role};
pub use config::Settings;
pub use llm::LanguageModel;
pub use prompt::PromptComposer;
pub use search::{SearchOutcome, SearchProvider, SearchResult, SearchTrigger};
pub use store::MessageStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
