//! Axum server setup
//!
//! Startup order: bootstrap the schema (retrying the connection per policy),
//! then bind and serve until Ctrl+C/SIGTERM. Nothing is served before the
//! bootstrap finished.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::DbConfig;
use crate::db::{
    bootstrap, BootstrapError, ConnectionManager, Connector, EntryStore, MySqlEntryStore, SchemaTarget,
};
use crate::render::{HtmlPage, PageRenderer};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub renderer: Arc<dyn PageRenderer>,
}

impl AppState {
    /// State with the built-in HTML page.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            renderer: Arc::new(HtmlPage),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::guestbook::router())
        .fallback(routes::fallback::not_found)
        .layer(CatchPanicLayer::custom(routes::fallback::internal_error))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bootstrap the schema, then build the router.
///
/// `state` receives the manager only after the bootstrap has finished, so no
/// request can reach the store while the first connection is still being
/// retried. A failed table statement is logged and the router is built anyway.
pub async fn prepare_app<C, F>(manager: ConnectionManager<C>, state: F) -> Result<Router, BootstrapError>
where
    C: Connector,
    C::Connection: SchemaTarget,
    F: FnOnce(ConnectionManager<C>) -> AppState,
{
    match bootstrap(&manager).await {
        Ok(()) => {}
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => tracing::warn!(error = %err, "continuing without a verified schema"),
    }

    Ok(build_router(state(manager)))
}

/// Run the HTTP server.
///
/// # Errors
///
/// Fails when the database stays unreachable for the whole retry policy, or
/// when the listener cannot be bound. A failed table statement is only logged.
///
/// # Example
///
/// ```ignore
/// run_server(ServerConfig::default(), DbConfig::default()).await?;
/// ```
pub async fn run_server(config: ServerConfig, db: DbConfig) -> Result<(), ServerError> {
    tracing::info!(
        host = %db.host,
        port = db.port,
        user = %db.user,
        database = %db.database,
        max_attempts = db.retry.max_attempts(),
        retry_delay_secs = db.retry.retry_delay().as_secs_f64(),
        "database config loaded"
    );

    let app = prepare_app(ConnectionManager::mysql(&db), |manager| {
        AppState::new(Arc::new(MySqlEntryStore::new(manager)))
    })
    .await?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),
}
