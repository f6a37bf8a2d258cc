//! Local filesystem storage backend.
//!
//! Files are written below a configured root directory with plain `std::fs`
//! calls; there is nothing to gain from async I/O for a handful of pages.

use crate::error::{ErrorKind, Result};
use crate::{StorageBackend, path::validate as validate_path};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend.
///
/// # Examples
///
/// ```no_run
/// use klipbook_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("/home/me/clippings")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    /// Root directory for the output
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend, creating the root directory if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, or exists but is not a
    /// directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let backend = Self::open(root)?;
        if !backend.root.exists() {
            fs::create_dir_all(&backend.root).map_err(|e| Self::map_io_error(e, &backend.root))?;
            tracing::debug!(root = %backend.root.display(), "Created output directory");
        }
        Ok(backend)
    }

    /// Like [`new`](Self::new), but leaves a missing root alone. Nothing
    /// exists below a missing root; writing creates it.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() || (root.exists() && !root.is_dir()) {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { root })
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            IoErrorKind::AlreadyExists => ErrorKind::AlreadyExists(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl StorageBackend for LocalBackend {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(abs_path.try_exists().map_err(ErrorKind::Io)?)
    }

    fn write(&self, path: &Path, data: &[u8], overwrite: bool) -> Result<PathBuf> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_io_error(e, path))?;
        }
        // `create_new` makes the existence check and the creation one atomic step.
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .create_new(!overwrite)
            .open(&abs_path)
            .map_err(|e| Self::map_io_error(e, &abs_path))?;
        file.write_all(data).map_err(|e| Self::map_io_error(e, &abs_path))?;
        tracing::debug!(path = %abs_path.display(), bytes = data.len(), "Wrote file");
        Ok(abs_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new(temp_dir.path()).is_ok());
        assert!(LocalBackend::new("relative/path").is_err());
        assert!(LocalBackend::new("./relative").is_err());
    }

    #[test]
    fn test_new_creates_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("a/b");
        LocalBackend::new(&root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_open_leaves_missing_root_alone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("a/b");
        let backend = LocalBackend::open(&root).unwrap();
        assert!(!backend.exists(Path::new("index.html")).unwrap());
        assert!(!root.exists());
        assert!(LocalBackend::open("relative").is_err());
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"data").unwrap();
        let err = LocalBackend::new(&file).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_write_and_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(temp_dir.path()).unwrap();
        assert!(!backend.exists(Path::new("book.html")).unwrap());
        let written = backend.write(Path::new("book.html"), b"hello", false).unwrap();
        assert_eq!(written, temp_dir.path().join("book.html"));
        assert!(backend.exists(Path::new("book.html")).unwrap());
        assert_eq!(fs::read(written).unwrap(), b"hello");
    }

    #[test]
    fn test_write_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(temp_dir.path()).unwrap();
        backend.write(Path::new("a/b/c/file.txt"), b"data", false).unwrap();
        assert!(backend.exists(Path::new("a/b/c/file.txt")).unwrap());
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(temp_dir.path()).unwrap();
        backend.write(Path::new("book.html"), b"original", false).unwrap();
        let err = backend.write(Path::new("book.html"), b"replacement", false).unwrap_err();
        assert!(matches!(&*err, ErrorKind::AlreadyExists(_)));
        assert_eq!(fs::read(temp_dir.path().join("book.html")).unwrap(), b"original");
    }

    #[test]
    fn test_write_overwrites_when_forced() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(temp_dir.path()).unwrap();
        backend.write(Path::new("book.html"), b"a much longer original", false).unwrap();
        backend.write(Path::new("book.html"), b"short", true).unwrap();
        assert_eq!(fs::read(temp_dir.path().join("book.html")).unwrap(), b"short");
    }

    #[test]
    fn test_path_security() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(temp_dir.path().join("out")).unwrap();
        assert!(backend.write(Path::new("../escape.html"), b"data", true).is_err());
        assert!(backend.exists(Path::new("a/../../escape.html")).is_err());
        assert!(!temp_dir.path().join("escape.html").exists());
    }
}
