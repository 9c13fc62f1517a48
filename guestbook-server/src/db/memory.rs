//! In-memory doubles for the database layer: an entry store for handler
//! tests and a scripted connector for acquisition and startup tests

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::connection::{ConnectionError, Connector};
use super::entries::{Entry, EntryStore, StoreError};
use super::schema::{SchemaError, SchemaTarget};
use crate::models::{NewEntry, MAX_NAME_LEN};

/// Keeps entries in a vector and mimics the column limits of the real table.
#[derive(Default)]
pub(crate) struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
    unavailable: AtomicBool,
    failing_reads: AtomicBool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database could not be reached.
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// `fetch_all` fails with a query error.
    pub(crate) fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    /// Insert with an explicit timestamp.
    pub(crate) fn seed(&self, name: &str, message: &str, created_at: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap();
        let id = entries.len() as i32 + 1;
        entries.push(Entry {
            id,
            name: name.to_owned(),
            message: message.to_owned(),
            created_at,
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(ConnectionError {
                attempts: 1,
                source: sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Entry>, StoreError> {
        self.check_available()?;
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Query(sqlx::Error::Protocol(
                "Table 'guestbook_db.entries' doesn't exist".into(),
            )));
        }

        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn insert(&self, entry: &NewEntry) -> Result<(), StoreError> {
        self.check_available()?;
        if entry.name().chars().count() > MAX_NAME_LEN {
            return Err(StoreError::Insert(sqlx::Error::Protocol(
                "Data too long for column 'name' at row 1".into(),
            )));
        }

        self.seed(entry.name(), entry.message(), Utc::now());
        Ok(())
    }
}

/// Refuses the first `failures` attempts, then hands out sessions numbered
/// by attempt. Counters are shared so they stay readable after the connector
/// moves into a manager.
#[derive(Default)]
pub(crate) struct FlakyConnector {
    failures: u32,
    failing_schema: bool,
    calls: Arc<AtomicU32>,
    closed: Arc<AtomicU32>,
}

impl FlakyConnector {
    pub(crate) fn failing(failures: u32) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    /// Sessions reject the table statement.
    pub(crate) fn with_failing_schema(mut self) -> Self {
        self.failing_schema = true;
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> u32 {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn call_counter(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }

    pub(crate) fn closed_counter(&self) -> Arc<AtomicU32> {
        self.closed.clone()
    }
}

/// Session handed out by [`FlakyConnector`].
#[derive(Debug)]
pub(crate) struct FakeSession {
    pub(crate) attempt: u32,
    failing_schema: bool,
}

#[async_trait]
impl Connector for FlakyConnector {
    type Connection = FakeSession;

    async fn connect(&self) -> Result<FakeSession, sqlx::Error> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            return Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(FakeSession {
            attempt,
            failing_schema: self.failing_schema,
        })
    }

    async fn close(&self, _conn: FakeSession) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SchemaTarget for FakeSession {
    async fn create_entries_table(&mut self) -> Result<(), SchemaError> {
        if self.failing_schema {
            return Err(SchemaError::from(sqlx::Error::Protocol(
                "CREATE command denied to user 'guestbook'".into(),
            )));
        }
        Ok(())
    }
}
