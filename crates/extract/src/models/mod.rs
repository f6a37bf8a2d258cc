mod entry;
mod kind;

pub use self::entry::Entry;
pub use self::kind::ClippingKind;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase()
}
