//! Page rendering for browser clients
//!
//! Handlers pass structured data to a [`PageRenderer`]; [`HtmlPage`] is the
//! built-in one, an Askama template that escapes everything it interpolates.

use askama::Template;

use crate::db::Entry;
use crate::models::MAX_NAME_LEN;

/// Error code carried in `/guestbook?error=...` after a failed form post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    DatabaseError,
    InsertError,
}

impl Notice {
    /// Parse a redirect error code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "missing_fields" => Some(Self::MissingFields),
            "database_error" => Some(Self::DatabaseError),
            "insert_error" => Some(Self::InsertError),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::DatabaseError => "database_error",
            Self::InsertError => "insert_error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Nombre y mensaje son requeridos",
            Self::DatabaseError => "Error de base de datos, inténtalo más tarde",
            Self::InsertError => "No se pudo guardar tu mensaje",
        }
    }
}

/// Data handed to a renderer for one page view.
#[derive(Debug, Clone, Copy)]
pub struct GuestbookPage<'a> {
    pub entries: &'a [Entry],
    pub notice: Option<Notice>,
}

/// The page could not be produced.
#[derive(Debug, thiserror::Error)]
#[error("page rendering failed: {0}")]
pub struct RenderError(pub String);

impl From<askama::Error> for RenderError {
    fn from(e: askama::Error) -> Self {
        Self(e.to_string())
    }
}

/// Turns a page view into a response body.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &GuestbookPage<'_>) -> Result<String, RenderError>;
}

/// Entry with its timestamps pre-formatted for the template.
struct EntryView<'a> {
    name: &'a str,
    message: &'a str,
    timestamp: String,
    display_time: String,
}

impl<'a> EntryView<'a> {
    fn from_entry(entry: &'a Entry) -> Self {
        Self {
            name: &entry.name,
            message: &entry.message,
            timestamp: entry.created_at.to_rfc3339(),
            display_time: entry.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "guestbook.html")]
struct GuestbookTemplate<'a> {
    entries: Vec<EntryView<'a>>,
    notice: Option<Notice>,
    max_name_len: usize,
}

/// Self-contained HTML page: submission form followed by the entry list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPage;

impl PageRenderer for HtmlPage {
    fn render(&self, page: &GuestbookPage<'_>) -> Result<String, RenderError> {
        let template = GuestbookTemplate {
            entries: page.entries.iter().map(EntryView::from_entry).collect(),
            notice: page.notice,
            max_name_len: MAX_NAME_LEN,
        };
        Ok(template.render()?)
    }
}
