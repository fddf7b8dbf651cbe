/*
    Errors
*/

use thiserror::Error;

/// Error type for every fallible codec operation.
///
/// Overflow and underflow while encoding are *not* errors: they are
/// resolved by the rounding policy into infinities, maximal finite
/// values, or signed zeros.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The exponent or significand width does not describe a usable format.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// A hex, binary, or decimal string could not be parsed,
    /// or a bit pattern has the wrong width.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The input has no encoding in the requested format.
    #[error("unrepresentable input: {0}")]
    UnrepresentableInput(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
