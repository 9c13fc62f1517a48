//! Entry store - the two statements the service runs against `entries`
//!
//! Each call opens its own connection and closes it before returning.
//! Statements run in autocommit mode; nothing here opens a transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::connection::{release, ConnectionError, ConnectionManager, MySqlConnector};
use crate::models::NewEntry;

/// Newest first. Rows sharing a timestamp come back in whatever order the
/// server produces; there is no tie-breaker.
const SELECT_ENTRIES: &str =
    "SELECT id, name, message, created_at FROM entries ORDER BY created_at DESC";

const INSERT_ENTRY: &str = "INSERT INTO entries (name, message) VALUES (?, ?)";

/// Entry record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Entry {
    pub id: i32,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Entry store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Unavailable(#[from] ConnectionError),

    #[error("{0}")]
    Query(#[source] sqlx::Error),

    #[error("{0}")]
    Insert(#[source] sqlx::Error),
}

/// Reads and appends guestbook entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, newest first, fully loaded.
    async fn fetch_all(&self) -> Result<Vec<Entry>, StoreError>;

    /// Append one validated entry. The store assigns `id` and `created_at`.
    async fn insert(&self, entry: &NewEntry) -> Result<(), StoreError>;
}

/// [`EntryStore`] backed by MySQL.
#[derive(Debug)]
pub struct MySqlEntryStore {
    manager: ConnectionManager<MySqlConnector>,
}

impl MySqlEntryStore {
    pub fn new(manager: ConnectionManager<MySqlConnector>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EntryStore for MySqlEntryStore {
    async fn fetch_all(&self) -> Result<Vec<Entry>, StoreError> {
        let mut conn = self.manager.acquire().await?;
        let result = sqlx::query_as::<_, Entry>(SELECT_ENTRIES)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        let entries = result.map_err(StoreError::Query)?;
        tracing::debug!(count = entries.len(), "entries fetched");
        Ok(entries)
    }

    async fn insert(&self, entry: &NewEntry) -> Result<(), StoreError> {
        let mut conn = self.manager.acquire().await?;
        let result = sqlx::query(INSERT_ENTRY)
            .bind(entry.name())
            .bind(entry.message())
            .execute(&mut conn)
            .await;
        release(conn).await;

        let done = result.map_err(StoreError::Insert)?;
        tracing::debug!(id = done.last_insert_id(), "entry inserted");
        Ok(())
    }
}
