use super::ClippingKind;
use time::PrimitiveDateTime;

/// A single record of the clippings export, before grouping into books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Book title (never empty)
    pub title: String,
    /// Book author, empty when the title line carries none
    pub author: String,
    /// Start of the location range within the book
    pub location: u32,
    /// Page marker as printed by the device, if any
    pub page: Option<String>,
    /// Device wall-clock time at which the clipping was made
    pub added_on: PrimitiveDateTime,
    /// Clipping content, empty for bookmarks
    pub text: String,
    pub kind: ClippingKind,
}
