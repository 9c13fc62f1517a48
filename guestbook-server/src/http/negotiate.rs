//! Response negotiation
//!
//! Reads: JSON only when the client accepts JSON and does not accept HTML
//! (`text/html`, `application/xhtml+xml` or `application/xml`), otherwise the
//! rendered page. Writes: JSON bodies get JSON replies, form
//! posts get redirected back to the listing (Post-Redirect-Get).

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;

use super::error::ApiError;
use super::routes::GUESTBOOK_PATH;

/// Output form of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    Json,
    Page,
}

impl ReadFormat {
    /// Pick the output form from the request's `Accept` headers.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let accept = AcceptList::from_headers(headers);
        let json = accept.accepts("application/json");
        let html = ["text/html", "application/xhtml+xml", "application/xml"]
            .iter()
            .any(|mime| accept.accepts(mime));

        if json && !html {
            Self::Json
        } else {
            Self::Page
        }
    }
}

/// Encoding of a request body, from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json` or `application/*+json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    Other,
}

impl BodyKind {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return Self::Other;
        };
        let mime = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
            Self::Json
        } else if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

/// How a write is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Status code plus JSON body
    Json,
    /// Redirect to the listing, with `?error=<code>` on failure
    Redirect,
}

impl ReplyMode {
    pub fn created(self) -> Response {
        match self {
            Self::Json => (
                StatusCode::CREATED,
                Json(json!({ "success": true, "message": "Entrada agregada" })),
            )
                .into_response(),
            Self::Redirect => Redirect::to(GUESTBOOK_PATH).into_response(),
        }
    }

    pub fn failed(self, err: ApiError) -> Response {
        match (self, err.notice()) {
            (Self::Redirect, Some(notice)) => {
                tracing::debug!(code = notice.code(), "redirecting form post with error");
                Redirect::to(&format!("{}?error={}", GUESTBOOK_PATH, notice.code())).into_response()
            }
            _ => err.into_response(),
        }
    }
}

/// One media range from an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
struct MediaRange {
    kind: String,
    subtype: String,
    quality: f32,
}

impl MediaRange {
    fn parse(item: &str) -> Option<Self> {
        let mut parts = item.split(';');
        let media = parts.next()?.trim().to_ascii_lowercase();
        let (kind, subtype) = match media.split_once('/') {
            Some((k, s)) => (k.trim().to_string(), s.trim().to_string()),
            None if media == "*" => ("*".to_string(), "*".to_string()),
            None => return None,
        };

        let mut quality = 1.0;
        for param in parts {
            if let Some((key, value)) = param.split_once('=') {
                if key.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?;
                }
            }
        }

        Some(Self {
            kind,
            subtype,
            quality,
        })
    }

    /// 2 for an exact match, 1 for `type/*`, 0 for `*/*`.
    fn specificity(&self, kind: &str, subtype: &str) -> Option<u8> {
        if self.kind == kind && self.subtype == subtype {
            Some(2)
        } else if self.kind == kind && self.subtype == "*" {
            Some(1)
        } else if self.kind == "*" && self.subtype == "*" {
            Some(0)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct AcceptList(Vec<MediaRange>);

impl AcceptList {
    fn from_headers(headers: &HeaderMap) -> Self {
        let ranges = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .filter(|item| !item.trim().is_empty())
            .filter_map(MediaRange::parse)
            .collect();
        Self(ranges)
    }

    /// The most specific matching range decides; `q=0` means refused.
    fn accepts(&self, mime: &str) -> bool {
        let Some((kind, subtype)) = mime.split_once('/') else {
            return false;
        };

        self.0
            .iter()
            .filter_map(|range| range.specificity(kind, subtype).map(|s| (s, range.quality)))
            .max_by_key(|(specificity, _)| *specificity)
            .is_some_and(|(_, quality)| quality > 0.0)
    }
}
