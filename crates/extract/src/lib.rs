mod consts;
pub mod error;
mod extract;
pub mod models;

use tracing::instrument;

use crate::error::Result;
pub use crate::extract::{Extraction, Extractor, ParsePolicy};
use crate::models::Entry;

/// Easy, top-level entrypoint for the extraction of [`Entry`] records from the
/// text of a clippings export.
///
/// Uses [`ParsePolicy::Strict`]: any malformed record fails the whole call and
/// no entries are returned. See [`Extractor`] to skip malformed records instead.
///
/// # Examples
///
/// ```rust
/// use klipbook_extract::extract_entries;
/// let export = "\
/// The Hobbit (J.R.R. Tolkien)
/// - Your Highlight on Location 120-121 | Added on Sunday, January 5, 2020 10:00:00 AM
///
/// In a hole in the ground there lived a hobbit.
/// ==========
/// ";
///
/// let entries = extract_entries(export).unwrap();
/// assert_eq!(entries[0].title, "The Hobbit");
/// assert_eq!(entries[0].location, 120);
/// ```
#[instrument(skip(text), fields(text_size = text.len()))]
pub fn extract_entries(text: &str) -> Result<Vec<Entry>> {
    Extractor::new(text).entries()
}
