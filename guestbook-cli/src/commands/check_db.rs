//! Connection check - prints what the configured server reports

use anyhow::{Context, Result};
use clap::Parser;

use guestbook_server::db::{release, server_info, ConnectionManager};

use crate::args::DbArgs;

/// Arguments for the check-db command
#[derive(Parser, Debug)]
pub struct CheckDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_check_db(args: CheckDbArgs) -> Result<()> {
    let config = args.db.into_config();

    println!("Configuration:");
    println!("  Host:     {}:{}", config.host, config.port);
    println!("  User:     {}", config.user);
    println!("  Database: {}", config.database);
    println!("  Password: {}", config.masked_password());
    println!();

    let manager = ConnectionManager::mysql(&config);
    let mut conn = manager
        .acquire()
        .await
        .with_context(|| format!("Could not connect to MySQL at {}:{}", config.host, config.port))?;

    let info = server_info(&mut conn).await;
    release(conn).await;
    let info = info.context("Connected, but the diagnostic queries failed")?;

    println!("Connection successful");
    println!("  Server version:   {}", info.version);
    println!("  Current database: {}", info.database.as_deref().unwrap_or("(none)"));
    println!("  Current user:     {}", info.user);
    match info.entries {
        Some(count) => println!("  Entries:          {}", count),
        None => println!("  Entries:          table missing (run `guestbook init-db`)"),
    }

    Ok(())
}
