//! JSON export of a library.
//!
//! The document is an array of books, most recently updated first:
//!
//! ```json
//! [
//!   {
//!     "title": "Dune",
//!     "author": "Frank Herbert",
//!     "last_update": "2020-02-01T10:00:00",
//!     "clippings": [
//!       { "location": 120, "page": "12", "text": "Fear is the mind-killer.", "type": "highlight" }
//!     ]
//!   }
//! ]
//! ```

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use klipbook_extract::models::ClippingKind;
use klipbook_library::models::{Book, Clipping};
use klipbook_storage::StorageBackend;
use serde::Serialize;
use std::path::{Path, PathBuf};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::instrument;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

#[derive(Serialize)]
struct BookDocument<'a> {
    title: &'a str,
    author: &'a str,
    last_update: String,
    clippings: Vec<ClippingDocument<'a>>,
}
impl<'a> TryFrom<&'a Book> for BookDocument<'a> {
    type Error = crate::error::Error;

    fn try_from(book: &'a Book) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            title: book.title(),
            author: book.author(),
            last_update: book.last_update().format(TIMESTAMP_FORMAT).or_raise(|| ErrorKind::Timestamp)?,
            clippings: book.clippings().iter().map(ClippingDocument::from).collect(),
        })
    }
}

#[derive(Serialize)]
struct ClippingDocument<'a> {
    location: u32,
    page: Option<&'a str>,
    text: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}
impl<'a> From<&'a Clipping> for ClippingDocument<'a> {
    fn from(clipping: &'a Clipping) -> Self {
        Self {
            location: clipping.location(),
            page: clipping.page(),
            text: clipping.text(),
            kind: ClippingKind::as_str(&clipping.kind()),
        }
    }
}

/// Serializes books into a single pretty-printed JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPrinter;
impl JsonPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, books: &[impl AsRef<Book>]) -> Result<String> {
        let documents = books
            .iter()
            .map(|book| BookDocument::try_from(book.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        serde_json::to_string_pretty(&documents).or_raise(|| ErrorKind::Serialize)
    }

    /// Renders the books and writes the document to `path` within the backend.
    #[instrument(skip_all, fields(books = books.len(), path = %path.as_ref().display()))]
    pub fn print(
        &self,
        books: &[impl AsRef<Book>],
        backend: &dyn StorageBackend,
        path: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf> {
        let document = self.render(books)?;
        let written = backend.write(path.as_ref(), document.as_bytes(), force).or_raise(|| ErrorKind::Storage)?;
        tracing::info!(path = %written.display(), "Wrote JSON export");
        Ok(written)
    }
}
