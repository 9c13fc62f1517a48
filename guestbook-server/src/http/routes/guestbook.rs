//! Guestbook endpoint - list and add entries
//!
//! `GET` reads every entry and negotiates JSON vs page. `POST` validates,
//! inserts, and answers per [`ReplyMode`](crate::http::negotiate::ReplyMode).
//! Other methods have no handler and end in the internal-error response.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Method},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::GUESTBOOK_PATH;
use crate::db::Entry;
use crate::http::error::ApiError;
use crate::http::extractors::Submission;
use crate::http::negotiate::ReadFormat;
use crate::http::server::AppState;
use crate::models::NewEntry;
use crate::render::{GuestbookPage, Notice};

/// Entry as served to JSON clients
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub name: String,
    pub message: String,
    pub created_at: String,
}

impl From<Entry> for EntryResponse {
    fn from(e: Entry) -> Self {
        Self {
            name: e.name,
            message: e.message,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// Raw query pairs of the listing page. Never rejects the request.
type PageQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Notice requested by `?error=<code>`. Only the first `error` pair counts;
/// an unreadable query string means no notice.
fn requested_notice(query: PageQuery) -> Option<Notice> {
    let Query(pairs) = query.ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "error")
        .and_then(|(_, code)| Notice::from_code(&code))
}

/// GET /guestbook - all entries, newest first
async fn list_entries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: PageQuery,
) -> Result<Response, ApiError> {
    let entries = state.store.fetch_all().await?;
    tracing::info!(count = entries.len(), "entries found");

    let response = match ReadFormat::negotiate(&headers) {
        ReadFormat::Json => {
            let body: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();
            Json(body).into_response()
        }
        ReadFormat::Page => {
            let page = GuestbookPage {
                entries: &entries,
                notice: requested_notice(query),
            };
            Html(state.renderer.render(&page)?).into_response()
        }
    };

    Ok(response)
}

/// POST /guestbook - add an entry
async fn add_entry(State(state): State<Arc<AppState>>, submission: Submission) -> Response {
    let reply = submission.reply;

    let entry = match NewEntry::new(&submission.name, &submission.message) {
        Ok(entry) => entry,
        Err(err) => return reply.failed(err.into()),
    };

    if let Err(err) = state.store.insert(&entry).await {
        return reply.failed(err.into());
    }

    tracing::info!(name = entry.name(), "entry added");
    reply.created()
}

/// Any other method on /guestbook
async fn unhandled_method(method: Method) -> ApiError {
    ApiError::UnhandledMethod { method }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        GUESTBOOK_PATH,
        get(list_entries).post(add_entry).fallback(unhandled_method),
    )
}
