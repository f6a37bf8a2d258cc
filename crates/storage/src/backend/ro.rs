//! Read-only storage backend.
//!
//! Wraps another backend and drops every write, while still reporting the
//! conflicts the write would have run into. Used for dry runs.

use crate::error::{ErrorKind, Result};
use crate::{BackendHandle, StorageBackend, path::validate as validate_path};
use std::path::{Path, PathBuf};

/// Read-only storage backend.
///
/// Writes are logged as an [`info event`](tracing::Event) and skipped. The
/// returned path is where the file *would* have been written.
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

impl StorageBackend for ReadOnlyBackend {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path)
    }

    fn write(&self, path: &Path, data: &[u8], overwrite: bool) -> Result<PathBuf> {
        let target = self.root().join(validate_path(path)?);
        if !overwrite && self.inner.exists(path)? {
            exn::bail!(ErrorKind::AlreadyExists(target));
        }
        tracing::info!(path = %target.display(), bytes = data.len(), "Skipping write during dry run");
        Ok(target)
    }
}
