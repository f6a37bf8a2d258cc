//! Embedded assets for rendering.
//!
//! HTML templates and the stylesheet are embedded into the binary at compile
//! time using [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "../../assets/"]
pub(crate) struct Builtins;
impl Builtins {
    /// Loads a builtin asset as text, e.g. `"templates/book.html"`.
    pub(crate) fn load(name: impl AsRef<str>) -> Result<String> {
        let name = name.as_ref();
        let file = Self::get(name).ok_or_raise(|| ErrorKind::AssetNotFound(Self::identifier(name)))?;
        String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::AssetNotFound(Self::identifier(name)))
    }

    pub(crate) fn identifier(name: impl AsRef<str>) -> String {
        format!("builtin:{}", name.as_ref().trim().trim_start_matches("builtin:"))
    }
}
