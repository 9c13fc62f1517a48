//! HTTP layer
//!
//! Axum server with:
//! - `GET /` redirect to the guestbook
//! - `GET|POST /guestbook` with JSON/HTML negotiation
//! - JSON 404 and 500 fallbacks
//! - Request tracing and graceful shutdown

pub mod error;
pub mod extractors;
pub mod negotiate;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, prepare_app, run_server, AppState, ServerConfig, ServerError};
