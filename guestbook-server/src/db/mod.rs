//! Database layer - connection manager, schema bootstrap and entry store
//!
//! # Design Principles
//!
//! - One connection per logical operation, no pool
//! - Every connection is closed before the operation returns, on every path
//! - Only acquisition is retried; queries and inserts fail straight through
//! - Parameterized statements only

pub mod connection;
pub mod diagnostics;
pub mod entries;
pub mod schema;

#[cfg(test)]
pub(crate) mod memory;

pub use connection::{release, ConnectionError, ConnectionManager, Connector, MySqlConnector};
pub use diagnostics::{server_info, ServerInfo};
pub use entries::{Entry, EntryStore, MySqlEntryStore, StoreError};
pub use schema::{bootstrap, ensure_schema, BootstrapError, SchemaError, SchemaTarget};

/// Connection settings for tests that need a live MySQL server.
///
/// Run with: MYSQL_HOST=... MYSQL_PASSWORD=... cargo test -p guestbook-server -- --ignored
#[cfg(test)]
pub(crate) fn live_test_config() -> crate::DbConfig {
    let defaults = crate::DbConfig::default();
    let var = |key: &str, fallback: String| std::env::var(key).unwrap_or(fallback);

    crate::DbConfig {
        host: var("MYSQL_HOST", defaults.host),
        port: std::env::var("MYSQL_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        user: var("MYSQL_USER", defaults.user),
        password: var("MYSQL_PASSWORD", defaults.password),
        database: var("MYSQL_DATABASE", defaults.database),
        retry: crate::RetryPolicy::fail_fast(),
    }
}
