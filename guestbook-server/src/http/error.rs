//! API error type with IntoResponse
//!
//! Every error becomes `{"error": "<message>"}` with a matching status code.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;
use crate::render::{Notice, RenderError};

pub const MISSING_FIELDS: &str = "Nombre y mensaje son requeridos";
pub const DATABASE_ERROR: &str = "Error de base de datos";
pub const NOT_FOUND: &str = "Endpoint no encontrado";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";
pub const MALFORMED_JSON: &str = "JSON inválido";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Name or message missing after trimming (400)
    Validation(ValidationError),

    /// JSON body could not be decoded (400)
    MalformedBody { detail: String },

    /// Database unreachable, or a statement failed (500, logged)
    Store(StoreError),

    /// No route (404)
    NotFound,

    /// `/guestbook` reached with a method other than GET/POST (500)
    UnhandledMethod { method: Method },

    /// Panic or other unexpected failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Error code for form clients, who are redirected instead of getting
    /// a JSON body. `None` for errors a form post cannot produce.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Validation(_) => Some(Notice::MissingFields),
            Self::Store(StoreError::Insert(_)) => Some(Notice::InsertError),
            Self::Store(_) => Some(Notice::DatabaseError),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => {
                tracing::debug!(reason = %e, "submission rejected");
                (StatusCode::BAD_REQUEST, MISSING_FIELDS.to_string())
            }
            Self::MalformedBody { detail } => (
                StatusCode::BAD_REQUEST,
                format!("{}: {}", MALFORMED_JSON, detail),
            ),
            Self::Store(StoreError::Unavailable(e)) => {
                tracing::error!("Database unavailable: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, DATABASE_ERROR.to_string())
            }
            // Driver text goes to the client as-is.
            // TODO: send DATABASE_ERROR instead of the driver message.
            Self::Store(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND.to_string()),
            Self::UnhandledMethod { method } => {
                tracing::warn!(%method, "no handler for method on /guestbook");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}
