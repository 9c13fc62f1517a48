//! Database configuration and connection retry policy
//!
//! Built once at startup (the CLI fills it from flags and `MYSQL_*`
//! environment variables) and handed to the connection manager.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

/// Default MySQL host
pub const DEFAULT_HOST: &str = "localhost";
/// Default MySQL port
pub const DEFAULT_PORT: u16 = 3306;
/// Default MySQL user
pub const DEFAULT_USER: &str = "root";
/// Default schema name
pub const DEFAULT_DATABASE: &str = "guestbook_db";

/// How many times to try opening a connection, and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    /// Attempts used by [`RetryPolicy::retrying`]
    pub const RETRY_ATTEMPTS: u32 = 5;
    /// Delay used by [`RetryPolicy::retrying`]
    pub const RETRY_DELAY: Duration = Duration::from_secs(5);

    /// Build a policy. `max_attempts` of 0 is treated as 1.
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    /// Single attempt, no waiting. For interactive use.
    pub fn fail_fast() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Five attempts, five seconds apart. For container startup where the
    /// database may come up after the service.
    pub fn retrying() -> Self {
        Self::new(Self::RETRY_ATTEMPTS, Self::RETRY_DELAY)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::retrying()
    }
}

/// MySQL connection settings
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub retry: RetryPolicy,
}

impl DbConfig {
    /// Driver options for opening a single connection.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// `***` when a password is set, `(empty)` otherwise.
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() {
            "(empty)"
        } else {
            "***"
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

// Hand-written so the password never reaches logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.masked_password())
            .field("database", &self.database)
            .field("retry", &self.retry)
            .finish()
    }
}
