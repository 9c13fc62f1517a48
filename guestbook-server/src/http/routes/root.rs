//! Root redirect

use axum::{response::Redirect, routing::get, Router};

use super::GUESTBOOK_PATH;

/// GET / - always the guestbook
async fn home() -> Redirect {
    Redirect::to(GUESTBOOK_PATH)
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
