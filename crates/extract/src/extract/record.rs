use super::added_on;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{ClippingKind, Entry};
use exn::{OptionExt, ResultExt};
use time::PrimitiveDateTime;
use tracing::instrument;

/// One delimiter-separated block of the export, with leading blank lines removed.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    /// 1-based position among the non-empty records of the export.
    pub(crate) position: usize,
    /// 1-based line number of the record's first line.
    pub(crate) line: usize,
    lines: Vec<&'a str>,
}

/// The parsed metadata line of a record.
#[derive(Debug)]
struct Header {
    kind: ClippingKind,
    page: Option<String>,
    location: u32,
    added_on: PrimitiveDateTime,
}

impl<'a> Record<'a> {
    /// Splits the export into records, keeping track of where each one starts.
    ///
    /// Blocks made only of whitespace (such as the trailing one after the final
    /// delimiter) are not records and are not counted.
    pub(crate) fn split(text: &'a str) -> Vec<Self> {
        let mut records = Vec::new();
        let mut block: Vec<&'a str> = Vec::new();
        let mut start = 1;
        for (index, line) in text.lines().enumerate() {
            if clean(line) == consts::RECORD_DELIMITER {
                Self::push(&mut records, std::mem::take(&mut block), start);
                start = index + 2;
            } else {
                block.push(line);
            }
        }
        Self::push(&mut records, block, start);
        records
    }

    fn push(records: &mut Vec<Self>, block: Vec<&'a str>, start: usize) {
        let Some(skip) = block.iter().position(|line| !clean(line).is_empty()) else {
            return;
        };
        records.push(Self {
            position: records.len() + 1,
            line: start + skip,
            lines: block[skip..].to_vec(),
        });
    }

    /// The error raised over any field-level failure in this record.
    pub(crate) fn malformed(&self) -> ErrorKind {
        ErrorKind::MalformedRecord {
            position: self.position,
            line: self.line,
        }
    }

    #[instrument(level = "trace", skip(self), fields(position = self.position, line = self.line))]
    pub(crate) fn entry(&self) -> Result<Entry> {
        let mut lines = self.lines.iter().copied();
        let (title, author) = title_and_author(lines.next().unwrap_or_default())?;
        let header = lines
            .next()
            .map(clean)
            .filter(|line| !line.is_empty())
            .ok_or_raise(|| ErrorKind::MissingField("metadata"))?;
        let header = Header::parse(header)?;
        let text = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        Ok(Entry {
            title,
            author,
            location: header.location,
            page: header.page,
            added_on: header.added_on,
            text,
            kind: header.kind,
        })
    }
}

impl Header {
    fn parse(line: &str) -> Result<Self> {
        let captures = consts::METADATA_REGEX.captures(line).ok_or_raise(|| ErrorKind::ParseError {
            field: "metadata",
            value: line.to_string(),
        })?;
        let kind: ClippingKind = captures.name("kind").map(|m| m.as_str()).unwrap_or_default().parse()?;
        let location = captures.name("location").ok_or_raise(|| ErrorKind::MissingField("location"))?.as_str();
        let location = location.parse::<u32>().or_raise(|| ErrorKind::ParseError {
            field: "location",
            value: location.to_string(),
        })?;
        let added = captures.name("added").ok_or_raise(|| ErrorKind::MissingField("added_on"))?;
        Ok(Self {
            kind,
            page: captures.name("page").map(|m| m.as_str().to_string()),
            location,
            added_on: added_on::parse(added.as_str())?,
        })
    }
}

fn clean(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == consts::BOM)
}

/// Splits a `Title (Author)` line. Without a trailing parenthesised group the
/// whole line is the title and the author is empty.
fn title_and_author(line: &str) -> Result<(String, String)> {
    let line = clean(line);
    let (title, author) = match consts::TITLE_REGEX.captures(line) {
        Some(captures) => (
            captures.name("title").map(|m| m.as_str().trim()).unwrap_or_default(),
            captures.name("author").map(|m| m.as_str().trim()).unwrap_or_default(),
        ),
        None => (line, ""),
    };
    if title.is_empty() {
        exn::bail!(ErrorKind::MissingField("title"));
    }
    Ok((title.to_string(), author.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case("The Hobbit (J.R.R. Tolkien)", "The Hobbit", "J.R.R. Tolkien")]
    #[case("\u{feff}The Hobbit (Tolkien, J.R.R.)", "The Hobbit", "Tolkien, J.R.R.")]
    #[case("Dune (Dune Chronicles, Book 1) (Frank Herbert)", "Dune (Dune Chronicles, Book 1)", "Frank Herbert")]
    #[case("Untitled Document", "Untitled Document", "")]
    #[case("  Spaced Out   (Someone)  ", "Spaced Out", "Someone")]
    fn test_title_and_author(#[case] line: &str, #[case] title: &str, #[case] author: &str) {
        let (t, a) = title_and_author(line).unwrap();
        assert_eq!(t, title);
        assert_eq!(a, author);
    }

    #[rstest]
    #[case("")]
    #[case("(Only An Author)")]
    fn test_missing_title(#[case] line: &str) {
        let err = title_and_author(line).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("title"));
    }

    #[rstest]
    #[case(
        "- Your Highlight on Location 1234-1236 | Added on Sunday, January 5, 2020 10:00:00 AM",
        ClippingKind::Highlight,
        None,
        1234
    )]
    #[case(
        "- Your Highlight on page 12 | Location 180-181 | Added on Sunday, January 5, 2020 10:00:00 AM",
        ClippingKind::Highlight,
        Some("12"),
        180
    )]
    #[case(
        "- Your Note on Location 50 | Added on Sunday, January 5, 2020 10:00:00 AM",
        ClippingKind::Note,
        None,
        50
    )]
    #[case(
        "- Your Bookmark on page xii | Location 77 | Added on Sunday, 5 January 2020 10:00:00",
        ClippingKind::Bookmark,
        Some("xii"),
        77
    )]
    #[case(
        "- Highlight Loc. 1234-36  | Added on Sunday, January 5, 2020, 10:00 AM",
        ClippingKind::Highlight,
        None,
        1234
    )]
    #[case(
        "- Highlight on Page 3 | Loc. 45-46 | Added on Sunday, January 5, 2020 10:00:00 AM",
        ClippingKind::Highlight,
        Some("3"),
        45
    )]
    fn test_header(
        #[case] line: &str,
        #[case] kind: ClippingKind,
        #[case] page: Option<&str>,
        #[case] location: u32,
    ) {
        let header = Header::parse(line).unwrap();
        assert_eq!(header.kind, kind);
        assert_eq!(header.page.as_deref(), page);
        assert_eq!(header.location, location);
        assert_eq!(header.added_on, datetime!(2020-01-05 10:00:00));
    }

    #[test]
    fn test_header_unknown_kind() {
        let err = Header::parse("- Your Clip on Location 5 | Added on Sunday, January 5, 2020 10:00:00 AM").unwrap_err();
        assert_eq!(*err, ErrorKind::UnknownKind("Clip".to_string()));
    }

    #[test]
    fn test_header_missing_location() {
        let err = Header::parse("- Your Note on page 5 | Added on Sunday, January 5, 2020 10:00:00 AM").unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("location"));
    }

    #[rstest]
    #[case("Some text that is not a header")]
    #[case("- Your Highlight on Location 12")]
    fn test_header_not_matching(#[case] line: &str) {
        let err = Header::parse(line).unwrap_err();
        assert!(matches!(*err, ErrorKind::ParseError { field: "metadata", .. }));
    }

    #[test]
    fn test_split_tracks_positions() {
        let text = "A\n- meta\n\ntext\n==========\n\n\nB\n- meta\n==========\n   \n==========\n";
        let records = Record::split(text);
        assert_eq!(records.len(), 2);
        assert_eq!((records[0].position, records[0].line), (1, 1));
        assert_eq!((records[1].position, records[1].line), (2, 8));
        assert_eq!(records[1].lines, vec!["B", "- meta"]);
    }

    #[test]
    fn test_entry_multiline_text() {
        let text = "Book (Author)\n- Your Note on Location 9 | Added on Sunday, January 5, 2020 10:00:00 AM\n\n  first\nsecond  \n";
        let record = Record::split(text).remove(0);
        let entry = record.entry().unwrap();
        assert_eq!(entry.text, "first\nsecond");
        assert_eq!(entry.kind, ClippingKind::Note);
    }

    #[test]
    fn test_entry_missing_metadata() {
        let record = Record::split("Book (Author)\n\nSome text").remove(0);
        let err = record.entry().unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("metadata"));
    }
}
