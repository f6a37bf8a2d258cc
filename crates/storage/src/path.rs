//! Validation of output paths relative to the output root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates an output path, resolving `.` and `..` components without
/// touching the filesystem.
///
/// A path is rejected if it would leave the output root, contains a null byte,
/// carries a Windows drive prefix, or resolves to nothing.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use klipbook_storage::validate_path;
/// assert!(validate_path("index.html").is_ok());
/// assert!(validate_path("books/../index.html").is_ok());
/// assert!(validate_path("../index.html").is_err());
/// assert!(validate_path("a\0b").is_err());
/// assert_eq!(validate_path("./books//dune.html").unwrap(), Path::new("books/dune.html"));
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            // Null bytes survive Path::components() on Unix but truncate paths in syscalls.
            Component::Normal(s) if s.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(s) => components.push(s),
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}
