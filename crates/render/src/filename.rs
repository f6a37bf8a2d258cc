//! File name templating for per-book HTML pages.
//!
//! Converts a [`Book`] into a deterministic, filesystem-safe file name using a
//! user-configurable [upon] template. On top of upon's Mustache-like syntax
//! (`{{ variable }}`, `{{ value|formatter }}`) two extensions are registered:
//!
//! - **`slug`**: converts strings to URL-safe slugs, stripping quotation marks
//!   first so that `"Quoted" Title` doesn't turn into `-quoted-title`.
//! - **`truncate`**: truncates strings to a maximum byte length at a character
//!   boundary, usable as `truncate(value, n)` or `{{ value|truncate: n }}`.
//!
//! # Template Variables
//!
//! | Variable      | Type     | Description                                        |
//! |---------------|----------|----------------------------------------------------|
//! | `title`       | `String` | Book title                                         |
//! | `author`      | `String` | Book author (may be empty)                         |
//! | `name`        | `String` | `"<author> <title>"`, or just the title            |
//! | `updated`     | `String` | Date of the last update, `YYYY-MM-DD`              |
//! | `clippings`   | `u64`    | Number of clippings                                |

use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use klipbook_library::models::Book;
use std::str::FromStr;
use time::macros::format_description;
use tracing::instrument;
use upon::{Engine, Template};

pub const DEFAULT_FILENAME_TEMPLATE: &str = "{{ name|truncate: 120|slug }}";
/// Used when a template renders to nothing, e.g. a title made only of punctuation.
const FALLBACK_NAME: &str = "untitled";

/// Generates the file name (without extension) of a book's HTML page.
///
/// Constructed via [`FromStr`], which compiles the template eagerly so that
/// syntax errors surface at creation time rather than at render time.
pub struct FileNamer {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for FileNamer {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template("filename"))?;
        Ok(Self { engine, template })
    }
}
impl FileNamer {
    pub fn new() -> Result<Self> {
        DEFAULT_FILENAME_TEMPLATE.parse()
    }

    /// Renders the template for the given book. Path separators are allowed,
    /// but the result is trimmed segment by segment and may not escape the
    /// output directory.
    #[instrument(skip_all, fields(title = book.title()))]
    pub fn generate(&self, book: &Book) -> Result<String> {
        let name = self
            .template
            .render(&self.engine, Self::parameters(book)?)
            .to_string()
            .or_raise(|| ErrorKind::Template("filename"))?;
        Self::normalize(name)
    }

    fn normalize(s: impl Into<String>) -> Result<String> {
        let path = s
            .into()
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        if path.is_empty() {
            return Ok(FALLBACK_NAME.to_string());
        }
        let path = klipbook_storage::validate_path(&path).or_raise(|| ErrorKind::Template("filename"))?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn parameters(book: &Book) -> Result<upon::Value> {
        let name = match book.author().trim() {
            "" => book.title().to_string(),
            author => format!("{author} {}", book.title()),
        };
        let updated =
            book.last_update().format(format_description!("[year]-[month]-[day]")).or_raise(|| ErrorKind::Timestamp)?;
        Ok(upon::value! {
            title: book.title(),
            author: book.author(),
            name: name,
            updated: updated,
            clippings: book.clippings().len() as u64,
        })
    }
}

/// Custom [`upon`] extensions for path-safe string manipulation.
mod addons {
    use rslug::slugify;
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    // '"‘’“”„‛`«»‹›
    const QUOTATION_MARKS: [char; 13] = [
        '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}', '\u{0060}',
        '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
    ];

    fn slug_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                let stripped: String = s.chars().filter(|c| !QUOTATION_MARKS.contains(c)).collect();
                write!(f, "{}", slugify!(&stripped))?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Never cuts a UTF-8 character in half.
    fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> String {
        s[..s.floor_char_boundary(max_bytes)].to_string()
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("slug", slug_formatter);
        engine.add_function("truncate", truncate_to_char_boundary);
    }
}
