pub mod author;
pub mod book;
pub mod genre;
pub mod language;

pub use author::{Author, AuthorPatch};
pub use book::{Book, BookExt, BookListing, BookPatch, BookView};
pub use genre::Genre;
pub use language::Language;
