//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use guestbook_server::http::{run_server, ServerConfig};

use crate::args::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "GUESTBOOK_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Bootstrap the schema, then serve until shutdown
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting guestbook on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    run_server(config, args.db.into_config())
        .await
        .context("Server error")?;

    Ok(())
}
