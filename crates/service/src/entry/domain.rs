use std::collections::BTreeMap;
use std::fmt;

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

/// Persisted entry as read from the store.
pub type Entry = models::entry::Model;

pub const DESCRIPTION: &str = "description";
pub const CONTENT: &str = "content";

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const CONTENT_REQUIRED: &str = "Content is required";
pub const DESCRIPTION_TAKEN: &str = "Description must be unique";

/// Submitted form fields. Either may be absent from the request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl EntryInput {
    pub fn new(description: impl Into<String>, content: impl Into<String>) -> Self {
        Self { description: Some(description.into()), content: Some(content.into()) }
    }

    pub fn description(&self) -> &str { self.description.as_deref().unwrap_or_default() }

    pub fn content(&self) -> &str { self.content.as_deref().unwrap_or_default() }
}

/// Row to insert; timestamps are chosen by the caller.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub description: String,
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Field name to human-readable message. Ordered so pages render stably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    /// Sets the message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub entries: Vec<Entry>,
    pub query: String,
    pub offset: u64,
    pub limit: u64,
    pub has_more: bool,
}

impl SearchPage {
    /// Offset of the following page, if there is one.
    pub fn next_offset(&self) -> Option<u64> {
        self.has_more.then(|| self.offset + self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_replace_and_display() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        errors.insert(DESCRIPTION, DESCRIPTION_REQUIRED);
        errors.insert(CONTENT, CONTENT_REQUIRED);
        errors.insert(DESCRIPTION, DESCRIPTION_TAKEN);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(DESCRIPTION), Some(DESCRIPTION_TAKEN));
        assert_eq!(
            errors.to_string(),
            "content: Content is required; description: Description must be unique"
        );
    }

    #[test]
    fn next_offset_only_when_more() {
        let page = SearchPage { entries: vec![], query: String::new(), offset: 5, limit: 5, has_more: true };
        assert_eq!(page.next_offset(), Some(10));
        let last = SearchPage { has_more: false, ..page };
        assert_eq!(last.next_offset(), None);
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let input = EntryInput::default();
        assert_eq!(input.description(), "");
        assert_eq!(input.content(), "");
    }
}
