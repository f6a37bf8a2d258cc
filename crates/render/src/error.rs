//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A template failed to compile or render.
    #[display("issue with template: {_0}")]
    Template(#[error(not(source))] &'static str),
    /// Builtin asset was not embedded (or is not valid UTF-8).
    #[display("asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
    /// A timestamp could not be formatted for output.
    Timestamp,
    /// The library could not be serialized to JSON.
    Serialize,
    /// Output files are already present and overwriting was not requested.
    #[display("{} output file(s) already exist, starting with {} (use --force to overwrite)", _0.len(), _0.first().map(|p| p.display().to_string()).unwrap_or_default())]
    AlreadyExists(#[error(not(source))] Vec<PathBuf>),
    /// Writing the output failed, or would have overwritten an existing file.
    Storage,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
