//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::{Form, Json};
use serde::Deserialize;

use super::error::ApiError;
use super::negotiate::{BodyKind, ReplyMode};

#[derive(Debug, Default, Deserialize)]
struct SubmissionFields {
    name: Option<String>,
    message: Option<String>,
}

/// Raw name/message from a guestbook post, plus how to answer it.
///
/// JSON bodies are answered with JSON. A urlencoded body carrying a `name`
/// field is a form submission and is answered with a redirect. Anything else
/// is treated as a JSON client with no fields.
#[derive(Debug)]
pub struct Submission {
    pub reply: ReplyMode,
    pub name: String,
    pub message: String,
}

impl Submission {
    fn new(reply: ReplyMode, fields: SubmissionFields) -> Self {
        Self {
            reply,
            name: fields.name.unwrap_or_default(),
            message: fields.message.unwrap_or_default(),
        }
    }
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::from_headers(req.headers()) {
            BodyKind::Json => {
                let Json(fields) = Json::<SubmissionFields>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::MalformedBody {
                        detail: rejection.body_text(),
                    })?;
                Ok(Self::new(ReplyMode::Json, fields))
            }
            BodyKind::Form => match Form::<SubmissionFields>::from_request(req, state).await {
                Ok(Form(fields)) if fields.name.is_some() => Ok(Self::new(ReplyMode::Redirect, fields)),
                Ok(_) => Ok(Self::new(ReplyMode::Json, SubmissionFields::default())),
                Err(rejection) => {
                    tracing::debug!(error = %rejection.body_text(), "undecodable form body");
                    Ok(Self::new(ReplyMode::Json, SubmissionFields::default()))
                }
            },
            BodyKind::Other => Ok(Self::new(ReplyMode::Json, SubmissionFields::default())),
        }
    }
}
