//! Schema bootstrap for the `entries` table
//!
//! Safe to run on every start: the statement is `CREATE TABLE IF NOT EXISTS`.

use async_trait::async_trait;
use sqlx::mysql::MySqlConnection;

use super::connection::{ConnectionError, ConnectionManager, Connector};

/// DDL for the only table the service uses.
pub const CREATE_ENTRIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        id INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// The table statement was rejected by the server.
#[derive(Debug, thiserror::Error)]
#[error("failed to create entries table: {0}")]
pub struct SchemaError(#[from] sqlx::Error);

/// Startup bootstrap failure.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl BootstrapError {
    /// Only an unreachable database stops startup; a failed table statement
    /// is logged and the server keeps running.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Create the `entries` table if it does not exist yet.
pub async fn ensure_schema(conn: &mut MySqlConnection) -> Result<(), SchemaError> {
    sqlx::query(CREATE_ENTRIES_TABLE).execute(&mut *conn).await?;
    Ok(())
}

/// A session that can run the table statement.
#[async_trait]
pub trait SchemaTarget: Send {
    async fn create_entries_table(&mut self) -> Result<(), SchemaError>;
}

#[async_trait]
impl SchemaTarget for MySqlConnection {
    async fn create_entries_table(&mut self) -> Result<(), SchemaError> {
        ensure_schema(self).await
    }
}

/// Acquire a connection, ensure the schema, release the connection.
pub async fn bootstrap<C>(manager: &ConnectionManager<C>) -> Result<(), BootstrapError>
where
    C: Connector,
    C::Connection: SchemaTarget,
{
    tracing::info!("Ensuring guestbook schema...");

    let mut conn = manager.acquire().await?;
    let result = conn.create_entries_table().await;
    manager.release(conn).await;

    match &result {
        Ok(()) => tracing::info!(table = "entries", "table created/verified"),
        Err(err) => tracing::error!(table = "entries", error = %err, "schema bootstrap failed"),
    }

    result.map_err(BootstrapError::from)
}
