//! Conversation data models

use crate::search::Source;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// One message of a session. Sessions are implicit: the messages sharing a
/// `session_id`, ordered by `created_at` then insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub session_id: String,
    pub role: Role,
    #[serde(rename = "content")]
    pub text: String,
    /// Cited sources; present only when search was used
    pub sources: Option<Vec<Source>>,
    pub used_search: bool,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(session_id: &str, role: Role, text: &str, sources: Vec<Source>) -> Self {
        let used_search = !sources.is_empty();
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            role,
            text: text.to_string(),
            sources: used_search.then_some(sources),
            used_search,
            // Stores keep microsecond precision
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// A user message
    pub fn user(session_id: &str, text: &str) -> Self {
        Self::new(session_id, Role::User, text, Vec::new())
    }

    /// An assistant reply citing `sources`; search counts as used only when
    /// at least one source exists
    pub fn assistant(session_id: &str, text: &str, sources: Vec<Source>) -> Self {
        Self::new(session_id, Role::Assistant, text, sources)
    }
}

/// Body of a turn submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Result of a turn submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: Message,
    pub success: bool,
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn ok(message: Message) -> Self {
        Self {
            message,
            success: true,
            error: None,
        }
    }

    pub fn failed(message: Message, error: impl Into<String>) -> Self {
        Self {
            message,
            success: false,
            error: Some(error.into()),
        }
    }
}
