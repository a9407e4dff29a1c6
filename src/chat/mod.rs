//! Chat module
//!
//! Message models and the conversation orchestrator.

mod error;
mod models;
mod orchestrator;

pub use error::ChatError;
pub use models::{ChatRequest, ChatResponse, Message, Role};
pub use orchestrator::{ConversationOrchestrator, DEFAULT_RESULTS_PER_TURN};
