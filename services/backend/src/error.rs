//! Custom error types for the backend service

use serde::Serialize;
use thiserror::Error;

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, in wire casing
    pub field: &'static str,
    /// Human-readable message for the caller
    pub message: String,
}

/// Collected field violations for one inbound payload
///
/// Validation never stops at the first violation; callers get every problem
/// in a single round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for a field
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether a violation was recorded for the given field
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Ok if no violations were recorded, otherwise the collected set
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Custom error type for the backend service
#[derive(Error, Debug)]
pub enum BackendError {
    /// One or more field constraints were violated
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A referenced row does not exist
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A should-be-unique query unexpectedly matched multiple rows
    #[error("Data integrity violation: {0}")]
    Integrity(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for backend results
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collects_all_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username is required");
        errors.add("email", "Please provide a valid email");

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("username"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn test_validation_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("name", "Item name is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username is required");
        errors.add("password", "Password is required");

        assert_eq!(
            errors.to_string(),
            "username: Username is required; password: Password is required"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = BackendError::NotFound {
            resource: "item",
            id: 42,
        };
        assert_eq!(err.to_string(), "item with id 42 not found");
    }
}
