use super::Clipping;
use time::PrimitiveDateTime;

/// All clippings sharing one title, in reading order.
///
/// Books are built in one go by [`Book::new`] and never change afterwards;
/// renderers only get read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    last_update: PrimitiveDateTime,
    clippings: Vec<Clipping>,
}
impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        last_update: PrimitiveDateTime,
        clippings: Vec<Clipping>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            last_update,
            clippings,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// May be empty when the export carried no author for this title.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The most recent time any of this book's clippings was added.
    pub fn last_update(&self) -> PrimitiveDateTime {
        self.last_update
    }

    /// Clippings in ascending location order.
    pub fn clippings(&self) -> &[Clipping] {
        &self.clippings
    }
}
impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}
