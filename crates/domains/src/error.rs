//! Error types shared across the domain boundary.

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure, e.g. `("title", "is too short")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated validation failures for one submitted form.
///
/// Collected rather than short-circuited so a form re-render can show every
/// problem at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Flat human-readable messages, `"field message"` per entry.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

/// Failures surfaced by repository ports.
///
/// Unique-constraint violations get their own variant so the service layer
/// can re-surface a storage-level race as a field validation error instead of
/// a server error.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: &'static str },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_and_formats_field_errors() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("title", "is too short (minimum is 3 characters)");
        errors.add("content", "is too short (minimum is 10 characters)");

        assert!(!errors.is_empty());
        assert!(errors.has("title"));
        assert!(!errors.has("slug"));
        assert_eq!(errors.messages().len(), 2);
        assert!(errors.to_string().contains("title is too short"));
    }
}
