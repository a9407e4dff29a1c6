//! SQLite-backed message store
//!
//! Wraps a single rusqlite Connection in a Mutex; queries run on the
//! blocking thread pool.

use super::{MessageStore, StoreError};
use crate::chat::{Message, Role};
use crate::search::Source;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// Message store backed by one SQLite table
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteStore {
    /// Open (or create) a database file; `table` is the store name
    pub fn open(path: &Path, table: &str) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        info!("Message store opened at {}", path.display());
        Self::with_connection(conn, table)
    }

    /// Open an in-memory database
    pub fn in_memory(table: &str) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                sources TEXT,
                used_search INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS {table}_session_idx
                ON {table} (session_id, created_at, seq);"
        ))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        })
    }

    /// Run a closure against the connection on the blocking pool
    async fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection, &str) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let table = self.table.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("connection lock poisoned: {}", e)))?;
            f(&conn, &table)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }
}

/// Only plain identifiers may name the table
fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Columns as read from a row
struct RawMessage {
    id: String,
    session_id: String,
    role: String,
    content: String,
    sources: Option<String>,
    used_search: bool,
    created_at: i64,
}

impl RawMessage {
    fn into_message(self) -> Result<Message, StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Corrupt(format!("bad id {}: {}", self.id, e)))?;
        let role = Role::parse(&self.role)
            .ok_or_else(|| StoreError::Corrupt(format!("bad role {}", self.role)))?;
        let sources = self
            .sources
            .map(|json| serde_json::from_str::<Vec<Source>>(&json))
            .transpose()?;

        Ok(Message {
            id,
            session_id: self.session_id,
            role,
            text: self.content,
            sources,
            used_search: self.used_search,
            created_at: from_micros(self.created_at)?,
        })
    }
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>, StoreError> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    Utc.timestamp_opt(secs, nanos)
        .single()
        .ok_or_else(|| StoreError::Corrupt(format!("bad timestamp {}", micros)))
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn append(&self, message: &Message) -> Result<(), StoreError> {
        let message = message.clone();
        let sources = message
            .sources
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.with_conn(move |conn, table| {
            conn.execute(
                &format!(
                    "INSERT INTO {table} (id, session_id, role, content, sources, used_search, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                params![
                    message.id.to_string(),
                    message.session_id,
                    message.role.as_str(),
                    message.text,
                    sources,
                    message.used_search,
                    message.created_at.timestamp_micros(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn history(&self, session_id: &str, limit: usize) -> Result<Vec<Message>, StoreError> {
        let session_id = session_id.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.with_conn(move |conn, table| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, session_id, role, content, sources, used_search, created_at
                 FROM {table}
                 WHERE session_id = ?1
                 ORDER BY created_at ASC, seq ASC
                 LIMIT ?2"
            ))?;

            let rows = stmt.query_map(params![session_id, limit], |row| {
                Ok(RawMessage {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    sources: row.get(4)?,
                    used_search: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;

            let messages = rows
                .map(|raw| -> Result<Message, StoreError> { raw?.into_message() })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(messages)
        })
        .await
    }

    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError> {
        let session_id = session_id.to_string();

        self.with_conn(move |conn, table| {
            let deleted = conn.execute(
                &format!("DELETE FROM {table} WHERE session_id = ?1"),
                params![session_id],
            )?;
            Ok(deleted as u64)
        })
        .await
    }
}
