//! Grouping of extracted entries into an ordered list of books.
//!
//! Every ordering produced here is deterministic and independent of the order
//! entries appear in the export:
//!
//! 1. entries are stable-sorted by title (byte order),
//! 2. bookmarks are dropped,
//! 3. entries with the exact same title form one book,
//! 4. within a book, entries are stable-sorted by location,
//! 5. books are stable-sorted by last update, most recent first. Books with
//!    the same last update stay in title order.
//! 6. the list is cut down to the requested number of books.

use crate::models::{Book, Clipping};
use klipbook_extract::models::Entry;
use tracing::instrument;

/// Builds the ordered list of books from extracted entries, keeping at most
/// `max_books` of the most recently updated ones.
#[instrument(skip(entries))]
pub fn build_books(entries: impl IntoIterator<Item = Entry>, max_books: usize) -> Vec<Book> {
    let mut entries: Vec<Entry> = entries.into_iter().collect();
    let total = entries.len();
    entries.sort_by(|a, b| a.title.cmp(&b.title));
    entries.retain(|entry| !entry.kind.is_bookmark());
    tracing::trace!(total, bookmarks = total - entries.len(), "Discarded bookmarks");

    let mut groups: Vec<Vec<Entry>> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some(group) if group.first().is_some_and(|first| first.title == entry.title) => group.push(entry),
            _ => groups.push(vec![entry]),
        }
    }

    let mut books: Vec<Book> = groups.into_iter().filter_map(book_from_entries).collect();
    books.sort_by(|a, b| b.last_update().cmp(&a.last_update()));
    books.truncate(max_books);
    tracing::debug!(books = books.len(), "Built library");
    books
}

/// Builds one book from entries that all share the same title.
///
/// The first entry in location order supplies the author; entries of one
/// title are assumed to agree on it. Returns `None` for an empty group.
fn book_from_entries(mut entries: Vec<Entry>) -> Option<Book> {
    entries.sort_by_key(|entry| entry.location);
    let last_update = entries.iter().map(|entry| entry.added_on).max()?;
    let first = entries.first()?;
    let (title, author) = (first.title.clone(), first.author.clone());
    let clippings = entries.into_iter().map(Clipping::from).collect();
    Some(Book::new(title, author, last_update, clippings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use klipbook_extract::models::ClippingKind;
    use rstest::rstest;
    use time::PrimitiveDateTime;
    use time::macros::datetime;

    fn entry(title: &str, location: u32, kind: ClippingKind, added_on: PrimitiveDateTime) -> Entry {
        Entry {
            title: title.to_string(),
            author: format!("Author of {title}"),
            location,
            page: None,
            added_on,
            text: format!("{title} @ {location}"),
            kind,
        }
    }

    fn sample() -> Vec<Entry> {
        use ClippingKind::*;
        vec![
            entry("Zebra", 30, Highlight, datetime!(2021-03-01 08:00)),
            entry("Apple", 500, Note, datetime!(2020-06-01 12:00)),
            entry("Zebra", 10, Note, datetime!(2021-01-01 08:00)),
            entry("Mango", 1, Bookmark, datetime!(2023-01-01 00:00)),
            entry("Apple", 20, Highlight, datetime!(2020-01-01 12:00)),
            entry("Apple", 20, Bookmark, datetime!(2024-01-01 12:00)),
            entry("Kiwi", 7, Highlight, datetime!(2022-05-05 05:05)),
            entry("Zebra", 20, Highlight, datetime!(2021-02-01 08:00)),
        ]
    }

    #[test]
    fn test_round_trip_scenario() {
        let entries = vec![
            entry("Book A", 100, ClippingKind::Highlight, datetime!(2020-01-01 00:00)),
            entry("Book A", 50, ClippingKind::Note, datetime!(2020-02-01 00:00)),
        ];
        let books = build_books(entries, 10);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Book A");
        assert_eq!(books[0].last_update(), datetime!(2020-02-01 00:00));
        let clippings: Vec<_> = books[0].clippings().iter().map(|c| (c.location(), c.kind())).collect();
        assert_eq!(clippings, vec![(50, ClippingKind::Note), (100, ClippingKind::Highlight)]);
    }

    #[test]
    fn test_multi_book_keeps_most_recent() {
        let entries = vec![
            entry("Old", 1, ClippingKind::Highlight, datetime!(2019-01-01 00:00)),
            entry("New", 1, ClippingKind::Highlight, datetime!(2020-01-01 00:00)),
            entry("Old", 2, ClippingKind::Highlight, datetime!(2019-06-01 00:00)),
        ];
        let books = build_books(entries, 1);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "New");
    }

    #[test]
    fn test_books_sorted_by_last_update() {
        let books = build_books(sample(), usize::MAX);
        let titles: Vec<_> = books.iter().map(Book::title).collect();
        assert_eq!(titles, vec!["Kiwi", "Zebra", "Apple"]);
        for pair in books.windows(2) {
            assert!(pair[0].last_update() >= pair[1].last_update());
        }
    }

    #[test]
    fn test_clippings_sorted_by_location() {
        for book in build_books(sample(), usize::MAX) {
            for pair in book.clippings().windows(2) {
                assert!(pair[0].location() <= pair[1].location());
            }
        }
    }

    #[test]
    fn test_bookmarks_are_dropped() {
        let books = build_books(sample(), usize::MAX);
        assert!(books.iter().flat_map(Book::clippings).all(|c| c.kind() != ClippingKind::Bookmark));
        // Bookmark-only titles produce no book at all.
        assert!(books.iter().all(|b| b.title() != "Mango"));
        // Bookmarks don't count towards the last update.
        let apple = books.iter().find(|b| b.title() == "Apple").unwrap();
        assert_eq!(apple.last_update(), datetime!(2020-06-01 12:00));
    }

    #[test]
    fn test_last_update_is_max_not_last() {
        let books = build_books(sample(), usize::MAX);
        let zebra = books.iter().find(|b| b.title() == "Zebra").unwrap();
        // Highest location (30) is also the latest, but the earliest location isn't the earliest added.
        assert_eq!(zebra.last_update(), datetime!(2021-03-01 08:00));
        assert_eq!(zebra.clippings().iter().map(Clipping::location).collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_groups_by_exact_title() {
        let mut entries = sample();
        entries.push(entry("apple", 1, ClippingKind::Highlight, datetime!(2020-01-01 00:00)));
        let books = build_books(entries, usize::MAX);
        let apples: Vec<_> = books.iter().filter(|b| b.title().eq_ignore_ascii_case("apple")).collect();
        assert_eq!(apples.len(), 2);
        let exact: Vec<_> = books.iter().filter(|b| b.title() == "Apple").collect();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].clippings().len(), 2);
    }

    #[test]
    fn test_author_from_first_location() {
        let mut later = entry("Same", 90, ClippingKind::Highlight, datetime!(2020-01-01 00:00));
        later.author = "Second Author".to_string();
        let mut earlier = entry("Same", 10, ClippingKind::Highlight, datetime!(2020-01-01 00:00));
        earlier.author = "First Author".to_string();
        let books = build_books(vec![later, earlier], 10);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author(), "First Author");
    }

    #[test]
    fn test_equal_locations_keep_export_order() {
        let mut first = entry("Same", 10, ClippingKind::Highlight, datetime!(2020-01-01 00:00));
        first.text = "first".to_string();
        let mut second = entry("Same", 10, ClippingKind::Note, datetime!(2020-01-01 00:00));
        second.text = "second".to_string();
        let books = build_books(vec![first, second], 10);
        let texts: Vec<_> = books[0].clippings().iter().map(Clipping::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_ties_broken_by_title() {
        let at = datetime!(2020-01-01 00:00);
        let entries = vec![
            entry("Charlie", 1, ClippingKind::Highlight, at),
            entry("Alpha", 1, ClippingKind::Highlight, at),
            entry("Bravo", 1, ClippingKind::Highlight, at),
        ];
        let books = build_books(entries, 10);
        let titles: Vec<_> = books.iter().map(Book::title).collect();
        assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_independent_of_export_order() {
        let mut reversed = sample();
        reversed.reverse();
        let a: Vec<_> = build_books(sample(), usize::MAX).iter().map(|b| b.title().to_string()).collect();
        let b: Vec<_> = build_books(reversed, usize::MAX).iter().map(|b| b.title().to_string()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(build_books(sample(), 10), build_books(sample(), 10));
    }

    #[test]
    fn test_empty_entries() {
        assert!(build_books(Vec::new(), 10).is_empty());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(4, 3)]
    #[case(usize::MAX, 3)]
    fn test_truncation(#[case] max_books: usize, #[case] expected: usize) {
        let books = build_books(sample(), max_books);
        assert_eq!(books.len(), expected);
    }
}
