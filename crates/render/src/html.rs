//! Static HTML site generation.
//!
//! Every book gets its own page and an `index.html` links them all together,
//! in the order the books were given. Text is HTML-escaped by default; only
//! the embedded stylesheet is inserted verbatim.

use crate::assets::Builtins;
use crate::error::{ErrorKind, Result};
use crate::filename::FileNamer;
use exn::ResultExt;
use klipbook_extract::models::ClippingKind;
use klipbook_library::models::{Book, Clipping};
use klipbook_storage::StorageBackend;
use std::collections::HashSet;
use std::path::PathBuf;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::instrument;
use std::fmt::Write;
use upon::{Engine, Template, Value};

pub const INDEX_FILENAME: &str = "index.html";
const BOOK_TEMPLATE: &str = "templates/book.html";
const INDEX_TEMPLATE: &str = "templates/index.html";
const STYLESHEET: &str = "styles/klipbook.css";
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day] [hour]:[minute]");

/// A rendered page, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub html: String,
}

pub struct HtmlPrinter {
    engine: Engine<'static>,
    book: Template<'static>,
    index: Template<'static>,
    stylesheet: String,
    namer: FileNamer,
}
impl HtmlPrinter {
    pub fn new() -> Result<Self> {
        Self::with_filename_template(crate::filename::DEFAULT_FILENAME_TEMPLATE)
    }

    /// Like [`new`](Self::new), but book pages are named after `template`
    /// instead. See [`FileNamer`] for the available variables.
    pub fn with_filename_template(template: &str) -> Result<Self> {
        let mut engine = Engine::new();
        engine.set_default_formatter(&escape_html);
        engine.add_formatter("raw", upon::fmt::default);
        let book = engine.compile(Builtins::load(BOOK_TEMPLATE)?).or_raise(|| ErrorKind::Template("book"))?;
        let index = engine.compile(Builtins::load(INDEX_TEMPLATE)?).or_raise(|| ErrorKind::Template("index"))?;
        Ok(Self {
            engine,
            book,
            index,
            stylesheet: Builtins::load(STYLESHEET)?,
            namer: template.parse()?,
        })
    }

    /// Works out where every book's page goes. Two books that would share a
    /// file name get a numeric suffix in order of appearance.
    fn filenames(&self, books: &[impl AsRef<Book>]) -> Result<Vec<String>> {
        let mut seen = HashSet::from([INDEX_FILENAME.trim_end_matches(".html").to_string()]);
        let mut names = Vec::with_capacity(books.len());
        for book in books {
            let stem = self.namer.generate(book.as_ref())?;
            let mut candidate = stem.clone();
            let mut suffix = 2;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{stem}-{suffix}");
                suffix += 1;
            }
            names.push(format!("{candidate}.html"));
        }
        Ok(names)
    }

    /// Renders the page of a single book. `filename` is where the page will
    /// live, so that the link back to the index resolves from subdirectories.
    pub fn render_book(&self, book: &Book, filename: &str) -> Result<String> {
        let depth = filename.matches('/').count();
        let clippings: Vec<Value> = book.clippings().iter().map(clipping_value).collect();
        let last_update = timestamp(book.last_update())?;
        self.book
            .render(
                &self.engine,
                upon::value! {
                    title: book.title(),
                    stylesheet: self.stylesheet.as_str(),
                    index: format!("{}{INDEX_FILENAME}", "../".repeat(depth)),
                    has_author: !book.author().is_empty(),
                    author: book.author(),
                    count: counted(book.clippings().len(), "clipping"),
                    last_update: last_update,
                    clippings: Value::List(clippings),
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template("book"))
    }

    /// Renders the index page, linking each book to the file of the same
    /// position in `filenames`.
    pub fn render_index(&self, books: &[impl AsRef<Book>], filenames: &[String]) -> Result<String> {
        let entries = books
            .iter()
            .zip(filenames)
            .map(|(book, href)| {
                let book = book.as_ref();
                let last_update = timestamp(book.last_update())?;
                Ok(upon::value! {
                    href: href.as_str(),
                    title: book.title(),
                    has_author: !book.author().is_empty(),
                    author: book.author(),
                    count: counted(book.clippings().len(), "clipping"),
                    last_update: last_update,
                })
            })
            .collect::<Result<Vec<Value>>>()?;
        self.index
            .render(
                &self.engine,
                upon::value! {
                    stylesheet: self.stylesheet.as_str(),
                    count: counted(books.len(), "book"),
                    books: Value::List(entries),
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template("index"))
    }

    /// Renders every page of the site without writing anything.
    pub fn render(&self, books: &[impl AsRef<Book>]) -> Result<Vec<Page>> {
        let filenames = self.filenames(books)?;
        let mut pages = Vec::with_capacity(books.len() + 1);
        for (book, filename) in books.iter().zip(&filenames) {
            pages.push(Page {
                path: PathBuf::from(filename),
                html: self.render_book(book.as_ref(), filename)?,
            });
        }
        pages.push(Page {
            path: PathBuf::from(INDEX_FILENAME),
            html: self.render_index(books, &filenames)?,
        });
        Ok(pages)
    }

    /// Renders the site and writes it into the backend.
    ///
    /// Unless `force` is set, nothing is written when any of the pages
    /// already exists. Returns the paths that were written, index last.
    #[instrument(skip_all, fields(books = books.len(), root = %backend.root().display()))]
    pub fn print(&self, books: &[impl AsRef<Book>], backend: &dyn StorageBackend, force: bool) -> Result<Vec<PathBuf>> {
        let pages = self.render(books)?;
        if !force {
            let conflicts = pages
                .iter()
                .filter_map(|page| match backend.exists(&page.path) {
                    Ok(true) => Some(Ok(backend.root().join(&page.path))),
                    Ok(false) => None,
                    Err(err) => Some(Err(err)),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .or_raise(|| ErrorKind::Storage)?;
            if !conflicts.is_empty() {
                exn::bail!(ErrorKind::AlreadyExists(conflicts));
            }
        }
        let mut written = Vec::with_capacity(pages.len());
        for page in &pages {
            let path = backend.write(&page.path, page.html.as_bytes(), force).or_raise(|| ErrorKind::Storage)?;
            tracing::debug!(path = %path.display(), "Wrote page");
            written.push(path);
        }
        tracing::info!(pages = written.len(), "Wrote HTML site");
        Ok(written)
    }
}

/// Default formatter: strings are HTML-escaped, everything else is written as is.
fn escape_html(f: &mut upon::fmt::Formatter<'_>, value: &Value) -> upon::fmt::Result {
    match value {
        Value::String(s) => {
            for c in s.chars() {
                match c {
                    '&' => f.write_str("&amp;")?,
                    '<' => f.write_str("&lt;")?,
                    '>' => f.write_str("&gt;")?,
                    '"' => f.write_str("&quot;")?,
                    '\'' => f.write_str("&#39;")?,
                    c => f.write_char(c)?,
                }
            }
        },
        v => upon::fmt::default(f, v)?,
    };
    Ok(())
}

/// `1 clipping`, `2 clippings`.
fn counted(count: usize, noun: &str) -> String {
    match count {
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    }
}

fn timestamp(at: PrimitiveDateTime) -> Result<String> {
    at.format(TIMESTAMP_FORMAT).or_raise(|| ErrorKind::Timestamp)
}

fn label(kind: ClippingKind) -> &'static str {
    match kind {
        ClippingKind::Highlight => "Highlight",
        ClippingKind::Note => "Note",
        ClippingKind::Bookmark => "Bookmark",
    }
}

fn clipping_value(clipping: &Clipping) -> Value {
    upon::value! {
        kind: clipping.kind().as_str(),
        label: label(clipping.kind()),
        text: clipping.text(),
        location: clipping.location() as u64,
        has_page: clipping.page().is_some(),
        page: clipping.page().unwrap_or_default(),
    }
}
