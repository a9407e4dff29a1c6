//! Process-local message store

use super::{MessageStore, StoreError};
use crate::chat::Message;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory store; messages are kept in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn append(&self, message: &Message) -> Result<(), StoreError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn history(&self, session_id: &str, limit: usize) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.read().await;
        let mut session: Vec<Message> = messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps
        session.sort_by_key(|m| m.created_at);
        session.truncate(limit);
        Ok(session)
    }

    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| m.session_id != session_id);
        Ok((before - messages.len()) as u64)
    }
}
