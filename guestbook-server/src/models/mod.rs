//! Domain models with validation at construction
//!
//! Submissions are trimmed and checked when a [`NewEntry`] is built;
//! invalid input returns [`ValidationError`], never a panic.

pub mod entry;
pub mod validation;

pub use entry::{NewEntry, MAX_NAME_LEN};
pub use validation::ValidationError;
