//! Guestbook submission validation

use super::ValidationError;

/// Column width of `entries.name`. Longer names are rejected by the database
/// on insert, not here.
pub const MAX_NAME_LEN: usize = 100;

/// A trimmed, non-empty submission ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    name: String,
    message: String,
}

impl NewEntry {
    /// Trim both fields and require them to be non-empty.
    ///
    /// # Example
    /// ```
    /// use guestbook_server::models::NewEntry;
    ///
    /// let entry = NewEntry::new("  Ada ", "hello\n").unwrap();
    /// assert_eq!(entry.name(), "Ada");
    /// assert!(NewEntry::new("   ", "hello").is_err());
    /// ```
    pub fn new(name: &str, message: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let message = message.trim();

        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if message.is_empty() {
            return Err(ValidationError::Empty { field: "message" });
        }

        Ok(Self {
            name: name.to_owned(),
            message: message.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
