//! Create the `entries` table and exit

use anyhow::{Context, Result};
use clap::Parser;

use guestbook_server::db::{bootstrap, ConnectionManager};

use crate::args::DbArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Unlike `serve`, a failed table statement is an error here.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = args.db.into_config();
    let manager = ConnectionManager::mysql(&config);

    bootstrap(&manager)
        .await
        .with_context(|| format!("Failed to initialize database '{}'", config.database))?;

    println!("Table 'entries' ready in {}@{}/{}", config.user, config.host, config.database);
    Ok(())
}
