/// Common utility functions.
use crate::field::FieldValue;

/// Result of reading an unsigned decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Number {
    /// Digits only, fits into [`FieldValue`].
    Value(FieldValue),
    /// Digits only, but too large for [`FieldValue`].
    Overflow,
    /// Empty or contains anything except ASCII digits.
    NotNumber,
}

/// Converts string of ASCII digits into unsigned number.
///
/// Signs, whitespace and other characters aren't accepted, leading zeros are.
pub(crate) fn parse_number(input: &str) -> Number {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        Number::NotNumber
    } else {
        input
            .parse::<FieldValue>()
            .map(Number::Value)
            .unwrap_or(Number::Overflow)
    }
}
