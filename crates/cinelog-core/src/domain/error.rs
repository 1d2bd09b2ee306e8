//! Domain validation failures
//!
//! Every value constructor fails with one of two kinds: the raw input was of
//! the wrong kind entirely (`Type`), or it was the right kind with content
//! that violates the field's rule (`Format`). Callers re-prompt on `Format`;
//! `Type` marks a broken input channel rather than a correctable value.

use thiserror::Error;

/// Result type alias for domain validation
pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Validation failure raised by value object constructors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Raw input of the wrong kind: a non-string JSON value where a string
    /// is required, an absent record field, unparsable integer text
    #[error("{field}: expected {expected}")]
    Type {
        field: &'static str,
        expected: &'static str,
    },

    /// Right kind of input, content violates the field's format or range rule
    #[error("{field}: {message}")]
    Format {
        field: &'static str,
        message: String,
    },
}

impl DomainError {
    /// Wrong-kind failure for `field`
    pub fn type_failure(field: &'static str, expected: &'static str) -> Self {
        Self::Type { field, expected }
    }

    /// Format or range failure for `field`
    pub fn format(field: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            field,
            message: message.into(),
        }
    }

    pub fn is_type_failure(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    pub fn is_format_failure(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Name of the field the failure belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::Type { field, .. } | Self::Format { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_failure_message_names_expected_kind() {
        let err = DomainError::type_failure("title", "a string");
        assert_eq!(err.to_string(), "title: expected a string");
        assert!(err.is_type_failure());
        assert!(!err.is_format_failure());
    }

    #[test]
    fn test_format_failure_carries_rule_message() {
        let err = DomainError::format("year", "must be between 1900 and 2026");
        assert_eq!(err.to_string(), "year: must be between 1900 and 2026");
        assert!(err.is_format_failure());
        assert_eq!(err.field(), "year");
    }
}
