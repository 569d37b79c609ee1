use crate::field::{FieldKind, FieldValue};
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Every variant except [`WrongFieldCount`](ParseError::WrongFieldCount) points to the offending field
/// and carries the literal atom text, so a caller can highlight the failure without parsing again.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Expression doesn't split into exactly five whitespace-separated fields.
    #[error("cron expression must have exactly 5 fields (minute hour day-of-month month day-of-week), found {found}")]
    WrongFieldCount {
        /// Number of fields actually found.
        found: usize,
    },
    /// Atom is empty, non-numeric or malformed.
    #[error("invalid {field} value: '{token}'")]
    InvalidToken {
        /// Offending field.
        field: FieldKind,
        /// Offending atom.
        token: String,
    },
    /// Numeric value is outside of the field's bounds.
    #[error("{field} value {value} in '{token}' is out of range {minimum}-{maximum}")]
    OutOfRange {
        /// Offending field.
        field: FieldKind,
        /// Offending atom.
        token: String,
        /// Parsed value, saturated to the value type maximum if it doesn't fit.
        value: FieldValue,
        /// Lower bound of the field.
        minimum: FieldValue,
        /// Upper bound of the field.
        maximum: FieldValue,
    },
    /// Step of the repeating pattern is zero or isn't a positive integer.
    #[error("invalid {field} step: '{token}'")]
    InvalidStep {
        /// Offending field.
        field: FieldKind,
        /// Offending atom.
        token: String,
    },
    /// Range start is greater than its end.
    #[error("invalid {field} range: '{token}'")]
    InvalidRange {
        /// Offending field.
        field: FieldKind,
        /// Offending atom.
        token: String,
    },
}

impl ParseError {
    /// Returns the field which failed to parse, if the error is field-scoped.
    pub fn field(&self) -> Option<FieldKind> {
        match self {
            Self::WrongFieldCount { .. } => None,
            Self::InvalidToken { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidStep { field, .. }
            | Self::InvalidRange { field, .. } => Some(*field),
        }
    }

    /// Returns zero-based position of the failed field in the expression.
    pub fn field_index(&self) -> Option<usize> {
        self.field().map(|field| field.index())
    }

    /// Returns the offending atom, if the error is field-scoped.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::WrongFieldCount { .. } => None,
            Self::InvalidToken { token, .. }
            | Self::OutOfRange { token, .. }
            | Self::InvalidStep { token, .. }
            | Self::InvalidRange { token, .. } => Some(token),
        }
    }
}
