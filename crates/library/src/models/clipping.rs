use klipbook_extract::models::{ClippingKind, Entry};

/// A highlight or note belonging to a [`Book`](super::Book).
///
/// Title, author and timestamp live on the book; a clipping only keeps what
/// tells it apart from its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipping {
    location: u32,
    page: Option<String>,
    text: String,
    kind: ClippingKind,
}
impl Clipping {
    pub fn new(location: u32, page: Option<String>, text: impl Into<String>, kind: ClippingKind) -> Self {
        Self {
            location,
            page,
            text: text.into(),
            kind,
        }
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ClippingKind {
        self.kind
    }
}
impl From<Entry> for Clipping {
    fn from(entry: Entry) -> Self {
        Self::new(entry.location, entry.page, entry.text, entry.kind)
    }
}
