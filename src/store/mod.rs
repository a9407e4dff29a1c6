//! Message persistence
//!
//! The document store appends messages, lists a session's messages in
//! creation order, and deletes whole sessions.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::chat::Message;
use crate::config::StorageSettings;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid store name '{0}'")]
    InvalidName(String),

    #[error("unsupported store url '{0}'")]
    UnsupportedUrl(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence for conversation messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one message
    async fn append(&self, message: &Message) -> Result<(), StoreError>;

    /// Up to `limit` messages of a session, oldest first
    async fn history(&self, session_id: &str, limit: usize) -> Result<Vec<Message>, StoreError>;

    /// Remove every message of a session, returning how many were removed
    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError>;
}

/// Open the store named by the settings' connection string
pub fn open(settings: &StorageSettings) -> Result<Arc<dyn MessageStore>, StoreError> {
    let url = settings.url.trim();

    if url.is_empty() || url == "memory" || url == "memory://" {
        return Ok(Arc::new(MemoryStore::new()));
    }
    if url == "sqlite::memory:" {
        return Ok(Arc::new(SqliteStore::in_memory(&settings.name)?));
    }
    if let Some(path) = url.strip_prefix("sqlite://") {
        return Ok(Arc::new(SqliteStore::open(Path::new(path), &settings.name)?));
    }

    Err(StoreError::UnsupportedUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> StorageSettings {
        StorageSettings {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_open_variants() {
        assert!(open(&settings("memory://")).is_ok());
        assert!(open(&settings("")).is_ok());
        assert!(open(&settings("sqlite::memory:")).is_ok());

        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("chat.db").display());
        let store = open(&settings(&url)).unwrap();
        store.append(&Message::user("s1", "hi")).await.unwrap();
        assert_eq!(store.history("s1", 10).await.unwrap().len(), 1);
    }

    #[test]
    fn test_open_rejects_unknown_scheme() {
        let err = open(&settings("mongodb://localhost:27017")).err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }
}
