//! Storage backend trait and implementations.
//!
//! Renderers only ever write into one output root, so the interface is small:
//! check whether a file exists, and write one. All paths are relative to the
//! backend's root and validated by [`validate_path`](crate::validate_path).

mod local;
mod ro;

pub use self::local::LocalBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Unified interface for output backends.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use klipbook_storage::{backend::StorageBackend, error::Result};
///
/// fn write_index(backend: &dyn StorageBackend, force: bool) -> Result<()> {
///     backend.write(Path::new("index.html"), b"<!doctype html>", force)?;
///     Ok(())
/// }
/// ```
pub trait StorageBackend {
    /// The directory every path is relative to.
    fn root(&self) -> &Path;

    fn exists(&self, path: &Path) -> Result<bool>;

    /// Writes `data` to `path`, creating parent directories as needed, and
    /// returns the absolute path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists) when
    /// the file is already present and `overwrite` is `false`; the existing
    /// file is left untouched.
    fn write(&self, path: &Path, data: &[u8], overwrite: bool) -> Result<PathBuf>;
}
