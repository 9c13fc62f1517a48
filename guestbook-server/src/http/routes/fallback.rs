//! Catch-all handlers for unknown routes and panics

use std::any::Any;

use axum::http::Uri;
use axum::response::{IntoResponse, Response};

use crate::http::error::ApiError;

/// Router fallback - 404 with a JSON body.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "no route");
    ApiError::NotFound
}

/// Panic handler for `CatchPanicLayer` - 500 with a JSON body, panic text
/// only in the log.
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal { message }.into_response()
}
