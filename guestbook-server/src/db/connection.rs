//! Connection manager - opens one MySQL connection per operation
//!
//! Acquisition follows a [`RetryPolicy`]: a failed attempt is logged and, while
//! attempts remain, retried after a fixed delay. The delay is a tokio timer, so
//! a waiting acquisition never blocks other requests and is cancelled when the
//! request future is dropped.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use crate::config::{DbConfig, RetryPolicy};

/// Opens a single database session.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Send;

    async fn connect(&self) -> Result<Self::Connection, sqlx::Error>;

    /// End a session. The default drops it.
    async fn close(&self, conn: Self::Connection) {
        drop(conn);
    }
}

/// Connector for a MySQL server described by a [`DbConfig`].
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Connection = MySqlConnection;

    async fn connect(&self) -> Result<MySqlConnection, sqlx::Error> {
        MySqlConnection::connect_with(&self.options).await
    }

    async fn close(&self, conn: MySqlConnection) {
        release(conn).await;
    }
}

/// Every attempt allowed by the policy failed.
#[derive(Debug, thiserror::Error)]
#[error("database unavailable after {attempts} attempt(s): {source}")]
pub struct ConnectionError {
    pub attempts: u32,
    #[source]
    pub source: sqlx::Error,
}

/// Acquires connections under a retry policy.
#[derive(Debug)]
pub struct ConnectionManager<C = MySqlConnector> {
    connector: C,
    policy: RetryPolicy,
}

impl ConnectionManager<MySqlConnector> {
    /// Manager for the configured MySQL server, using the configured policy.
    pub fn mysql(config: &DbConfig) -> Self {
        Self::new(MySqlConnector::new(config), config.retry)
    }
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    /// Open a connection, retrying per policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] carrying the last driver error once all
    /// attempts are used up.
    pub async fn acquire(&self) -> Result<C::Connection, ConnectionError> {
        let max_attempts = self.policy.max_attempts();
        let delay = self.policy.retry_delay();
        let mut attempt = 1;

        loop {
            match self.connector.connect().await {
                Ok(conn) => {
                    if attempt > 1 {
                        tracing::info!(attempt, max_attempts, "database connection established");
                    } else {
                        tracing::debug!("database connection established");
                    }
                    return Ok(conn);
                }
                Err(err) if attempt < max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        retry_in_secs = delay.as_secs_f64(),
                        error = %err,
                        "database connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "database connection failed, giving up"
                    );
                    return Err(ConnectionError {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Hand a connection back to the connector for closing.
    pub async fn release(&self, conn: C::Connection) {
        self.connector.close(conn).await;
    }
}

/// Close a connection. A failed close is logged, not returned; the socket is
/// dropped either way.
pub async fn release(conn: MySqlConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "failed to close database connection cleanly");
    }
}
