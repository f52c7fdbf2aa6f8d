//! Truncation Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A truncation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for truncation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An option or length was rejected before scanning started.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    /// A closing tag did not match the innermost open tag. Only raised in
    /// strict mode; otherwise the markup is recovered transparently.
    #[display("malformed markup: unmatched closing tag '{tag}' at byte {position}")]
    MalformedMarkup {
        /// The (lowercased) name of the offending closing tag.
        tag: String,
        /// Byte offset of the closing tag in the input.
        position: usize,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Truncation is a pure function of its input, the same call
        // will always fail the same way.
        false
    }
}
