mod book;
mod clipping;

pub use self::book::Book;
pub use self::clipping::Clipping;
