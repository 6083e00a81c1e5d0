//! Error types for the domain layer.

use thiserror::Error;

/// Bad input data encountered by a pure domain function.
///
/// Domain functions never return these as `Err`; they fail closed to a
/// safe default and attach the error to their result so callers can
/// surface it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Field '{field}' has an invalid date: '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("Field '{field}' has an invalid number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Row {row}: {source}")]
    AtRow {
        row: usize,
        #[source]
        source: Box<ParseError>,
    },

    #[error("Stored collection '{key}' is corrupt: {reason}")]
    CorruptCollection { key: String, reason: String },
}

impl ParseError {
    /// Creates an invalid date error.
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        ParseError::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid number error.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        ParseError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a corrupt stored collection error.
    pub fn corrupt_collection(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::CorruptCollection {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Wraps this error with the 1-based row it was found on.
    pub fn at_row(self, row: usize) -> Self {
        ParseError::AtRow {
            row,
            source: Box::new(self),
        }
    }

    /// Returns the row number if this error was tagged with one.
    pub fn row(&self) -> Option<usize> {
        match self {
            ParseError::AtRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// Serializes parse errors as their messages.
pub fn serialize_messages<S>(errors: &[ParseError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has unknown value '{value}'")]
    UnknownValue { field: String, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an unknown value validation error.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }
}
