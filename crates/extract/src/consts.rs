use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Line separating two records in the export.
pub(crate) const RECORD_DELIMITER: &str = "==========";
/// Devices prefix the file (and sometimes every record) with a byte-order mark.
pub(crate) const BOM: char = '\u{feff}';

// `Title (Author)`: the author is the trailing parenthesised group only, so
// `Dune (Dune Chronicles, Book 1) (Frank Herbert)` keeps the series in the title.
regex!(TITLE_REGEX, r"^(?P<title>.*?)\s*\((?P<author>[^()]*)\)\s*$");
// `- Your Highlight on page 12 | Location 180-181 | Added on Sunday, January 5, 2020 10:00:00 AM`
// `- Highlight Loc. 1234-36  | Added on Thursday, May 10, 2012, 11:31 PM`
regex!(
    METADATA_REGEX,
    concat!(
        r"(?i)^-\s*(?:your\s+)?(?P<kind>\w+)(?:\s+(?:on|at))?",
        r"(?:\s*\|?\s*page\s+(?P<page>[^\s|]+))?",
        r"(?:\s*\|?\s*loc(?:ation|\.)\s*(?P<location>\d+)(?:\s*-\s*\d+)?)?",
        r"\s*\|\s*added\s+on\s+(?P<added>.+?)\s*$",
    )
);
// `Sunday, January 5, 2020 10:00:00 AM`, `Sunday, 5 January 2020 10:00:00`, `Thursday, May 10, 2012, 11:31 PM`
regex!(
    ADDED_ON_REGEX,
    concat!(
        r"(?i)^(?:[a-z]+,\s*)?",
        r"(?:(?P<us_month>[a-z]+)\.?\s+(?P<us_day>\d{1,2})|(?P<day>\d{1,2})\s+(?P<month>[a-z]+)\.?)",
        r",?\s+(?P<year>\d{4}),?\s+",
        r"(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2}))?",
        r"(?:\s*(?P<meridiem>[ap])\.?m\.?)?$",
    )
);
