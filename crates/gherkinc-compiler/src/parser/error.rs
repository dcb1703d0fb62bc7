//! Parse-error type shared by the header and Gherkin parsers.

use thiserror::Error;

/// A recoverable parse failure. The diagnostic has already been printed to
/// stderr by [`Cursor::error`](super::Cursor::error) when this value is
/// constructed; callers only decide the recovery policy.
#[derive(Debug, Clone, Error)]
#[error("parse error on line {line}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}
