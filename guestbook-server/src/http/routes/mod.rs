//! Route handlers

pub mod fallback;
pub mod guestbook;
pub mod root;

/// Canonical listing and submission endpoint.
pub const GUESTBOOK_PATH: &str = "/guestbook";
