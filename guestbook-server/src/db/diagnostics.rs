//! Server diagnostics for the `check-db` command

use sqlx::mysql::MySqlConnection;

/// What the connected server reports about itself and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub version: String,
    pub database: Option<String>,
    pub user: String,
    /// Row count of `entries`, `None` when the table does not exist yet.
    pub entries: Option<i64>,
}

pub async fn server_info(conn: &mut MySqlConnection) -> Result<ServerInfo, sqlx::Error> {
    let (version, database, user): (String, Option<String>, String) =
        sqlx::query_as("SELECT VERSION(), DATABASE(), USER()")
            .fetch_one(&mut *conn)
            .await?;

    let (tables,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = DATABASE() AND table_name = 'entries'",
    )
    .fetch_one(&mut *conn)
    .await?;

    let entries = if tables > 0 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(&mut *conn)
            .await?;
        Some(count)
    } else {
        None
    };

    Ok(ServerInfo {
        version,
        database,
        user,
        entries,
    })
}
