//! guestbook CLI - runs and maintains the guestbook service
//!
//! - `serve`: bootstrap the schema and serve HTTP
//! - `init-db`: create the `entries` table and exit
//! - `check-db`: verify MySQL connectivity and print server details

use anyhow::Result;
use clap::{Parser, Subcommand};

mod args;
mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "guestbook",
    author,
    version,
    about = "Minimal guestbook service backed by MySQL",
    long_about = "Serve a guestbook over HTTP: visitors post a name and a message, \
                  and every entry is listed newest first as JSON or as an HTML page."
)]
struct Cli {
    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (creates the entries table first)
    Serve(commands::serve::ServeArgs),
    /// Create the entries table if it does not exist, then exit
    InitDb(commands::init_db::InitDbArgs),
    /// Check the MySQL connection and print server details
    CheckDb(commands::check_db::CheckDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads environment fallbacks
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::InitDb(args) => commands::init_db::run_init_db(args).await,
        Commands::CheckDb(args) => commands::check_db::run_check_db(args).await,
    }
}
