//! Language-model module
//!
//! Defines the LanguageModel trait and an OpenAI-compatible client.

mod traits;

pub mod openai;

pub use openai::OpenAiChat;
pub use traits::*;
