//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. A record-level failure is always
//! raised as [`ErrorKind::MalformedRecord`], with the field-level cause kept
//! as a child in the error tree.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A record in the export does not follow the clippings grammar.
    #[display("malformed record #{position} starting on line {line}")]
    MalformedRecord {
        /// 1-based position of the record in the export.
        position: usize,
        /// 1-based line number on which the record starts.
        line: usize,
    },
    /// A required line or field could not be found in the record.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// The metadata line names a clipping type other than highlight, note or bookmark.
    #[display("unknown clipping type: {_0}")]
    UnknownKind(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The export is either well-formed or it isn't.
        false
    }
}
