use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// The kind of annotation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum ClippingKind {
    /// A highlighted passage of the book.
    Highlight,
    /// A free-text note attached to a location.
    Note,
    /// A bookmarked location, without any text.
    Bookmark,
}
impl ClippingKind {
    /// Returns the lowercase identifier for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClippingKind::Highlight => "highlight",
            ClippingKind::Note => "note",
            ClippingKind::Bookmark => "bookmark",
        }
    }

    pub fn is_bookmark(&self) -> bool {
        matches!(self, ClippingKind::Bookmark)
    }
}
impl FromStr for ClippingKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "highlight" => Self::Highlight,
            "note" => Self::Note,
            "bookmark" => Self::Bookmark,
            _ => exn::bail!(ErrorKind::UnknownKind(s.trim().to_string())),
        })
    }
}

impl Display for ClippingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
