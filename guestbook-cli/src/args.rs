//! Database connection flags shared by every command
//!
//! Each flag falls back to an environment variable, then to the documented
//! default. `.env` is loaded before parsing, so it can supply them too.

use std::time::Duration;

use clap::Args;
use guestbook_server::config::{DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER};
use guestbook_server::{DbConfig, RetryPolicy};

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// MySQL host
    #[arg(long = "mysql-host", env = "MYSQL_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// MySQL port
    #[arg(long = "mysql-port", env = "MYSQL_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// MySQL user
    #[arg(long = "mysql-user", env = "MYSQL_USER", default_value = DEFAULT_USER)]
    pub user: String,

    /// MySQL password
    #[arg(
        long = "mysql-password",
        env = "MYSQL_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Database (schema) name
    #[arg(long = "mysql-database", env = "MYSQL_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Connection attempts before giving up
    #[arg(long, env = "GUESTBOOK_CONNECT_ATTEMPTS", default_value_t = RetryPolicy::RETRY_ATTEMPTS)]
    pub connect_attempts: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, env = "GUESTBOOK_RETRY_DELAY_SECS", default_value_t = RetryPolicy::RETRY_DELAY.as_secs())]
    pub retry_delay: u64,

    /// Try to connect once and fail immediately (overrides the two flags above)
    #[arg(long)]
    pub fail_fast: bool,
}

impl DbArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        if self.fail_fast {
            RetryPolicy::fail_fast()
        } else {
            RetryPolicy::new(self.connect_attempts, Duration::from_secs(self.retry_delay))
        }
    }

    pub fn into_config(self) -> DbConfig {
        let retry = self.retry_policy();
        DbConfig {
            host: self.host,
            port: self.port,
            user: self.user,
            password: self.password,
            database: self.database,
            retry,
        }
    }
}
