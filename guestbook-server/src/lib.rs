//! guestbook-server: a minimal message board over HTTP
//!
//! Visitors post a name and a message; every submission is stored in the
//! `entries` table and listed newest first, either as JSON or as an HTML page
//! depending on what the client accepts.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod render;

pub use config::{DbConfig, RetryPolicy};
pub use http::{run_server, ServerConfig};
