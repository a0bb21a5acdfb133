//! Error types for the core library

use std::fmt;

use thiserror::Error;

/// Ordered list of rule violations, one human-readable message per broken rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when no rule was broken, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(ValidationErrors),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// The three outward classes every core failure collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied bad input (task fields or query parameters).
    Validation,
    /// The referenced task does not exist.
    NotFound,
    /// Durable read or write failed.
    Persistence,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) | Error::InvalidQuery(_) => ErrorKind::Validation,
            Error::TaskNotFound(_) => ErrorKind::NotFound,
            Error::Io(_) | Error::Serialization(_) | Error::Storage(_) => ErrorKind::Persistence,
        }
    }

    /// Violation messages for input errors, empty for everything else.
    pub fn details(&self) -> &[String] {
        match self {
            Error::Validation(errors) | Error::InvalidQuery(errors) => errors.messages(),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let validation = Error::Validation(vec!["bad".to_string()].into());
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.details(), ["bad".to_string()]);

        let not_found = Error::TaskNotFound("abc".to_string());
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(not_found.details().is_empty());

        let storage = Error::Storage("disk full".to_string());
        assert_eq!(storage.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_validation_errors_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push("first");
        errors.push("second");
        assert_eq!(errors.to_string(), "first, second");
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
