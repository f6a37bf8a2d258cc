//! CLI Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A command error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration could not be loaded.
    Config,
    /// The clippings export could not be read.
    #[display("could not read input file: {}", _0.display())]
    Input(#[error(not(source))] PathBuf),
    /// The clippings export is malformed.
    #[display("could not parse input file: {}", _0.display())]
    Parse(#[error(not(source))] PathBuf),
    /// The output location is unusable.
    #[display("invalid output path: {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
    /// Rendering or writing the output failed.
    Render,
    /// Writing to the terminal failed.
    Terminal,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}
