//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Which class of invariant a value failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// A required field was missing or blank.
    Required,
    /// A value fell outside its allowed length range.
    Length,
    /// A value did not have the expected textual shape.
    Format,
    /// A change operation was given the value already held.
    Unchanged,
    /// A state transition was requested into the state already held.
    Transition,
}

/// A single failed invariant: which kind, on which field, and a readable message.
///
/// Serializable so callers can hand it to an end user unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    kind: ValidationKind,
    field: String,
    message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. Everything the
/// customer model rejects is a validation failure; there is no I/O to fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value or state transition failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl DomainError {
    pub fn required(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(ValidationKind::Required, field, msg))
    }

    pub fn length(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(ValidationKind::Length, field, msg))
    }

    pub fn format(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(ValidationKind::Format, field, msg))
    }

    pub fn unchanged(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(ValidationKind::Unchanged, field, msg))
    }

    pub fn transition(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(ValidationKind::Transition, field, msg))
    }

    /// The underlying validation failure.
    pub fn validation(&self) -> &ValidationError {
        match self {
            Self::Validation(e) => e,
        }
    }

    /// Shorthand for `self.validation().kind()`.
    pub fn kind(&self) -> ValidationKind {
        self.validation().kind()
    }
}
