mod aggregate;
pub mod models;

pub use crate::aggregate::build_books;
use crate::models::Book;
use klipbook_extract::models::Entry;
use std::ops::Deref;
use std::slice::Iter;

/// The ordered, read-only list of books handed to renderers.
///
/// Computed exactly once, by [`Library::new`], from the entries of one export;
/// every later read sees the same books in the same order.
///
/// # Example
///
/// ```
/// use klipbook_extract::extract_entries;
/// use klipbook_library::Library;
///
/// let export = "\
/// Book A (Someone)
/// - Your Highlight on Location 100 | Added on Wednesday, January 1, 2020 12:00:00 AM
///
/// Later in the book.
/// ==========
/// Book A (Someone)
/// - Your Note on Location 50 | Added on Saturday, February 1, 2020 12:00:00 AM
///
/// Earlier in the book.
/// ==========
/// ";
///
/// let library = Library::new(extract_entries(export).unwrap(), 10);
/// assert_eq!(library.len(), 1);
/// let locations: Vec<u32> = library[0].clippings().iter().map(|c| c.location()).collect();
/// assert_eq!(locations, vec![50, 100]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}
impl Library {
    /// Builds the library, keeping at most `max_books` books. See [`build_books`].
    pub fn new(entries: impl IntoIterator<Item = Entry>, max_books: usize) -> Self {
        Self {
            books: build_books(entries, max_books),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> Iter<'_, Book> {
        self.books.iter()
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }
}
impl Deref for Library {
    type Target = [Book];
    fn deref(&self) -> &Self::Target {
        &self.books
    }
}
impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = Iter<'a, Book>;
    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
