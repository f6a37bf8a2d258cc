//! Output formats for a [`Library`](klipbook_library::Library).
//!
//! - [`JsonPrinter`] writes every book into one JSON document.
//! - [`HtmlPrinter`] writes a small static site: one page per book plus an
//!   index linking them together.
//!
//! Both write through a [`StorageBackend`](klipbook_storage::StorageBackend)
//! and refuse to overwrite existing files unless asked to.

mod assets;
pub mod error;
mod filename;
mod html;
mod json;

pub use crate::filename::{DEFAULT_FILENAME_TEMPLATE, FileNamer};
pub use crate::html::{HtmlPrinter, INDEX_FILENAME, Page};
pub use crate::json::JsonPrinter;
