pub(crate) mod bind;
pub mod catalog;
pub mod constraint;
pub mod manager;
pub mod models;
pub mod mutation;
pub mod query;

pub use catalog::{AuthorStore, BookStore, CatalogStore, GenreStore, LanguageStore};
pub use manager::{Database, DatabaseError};
pub use mutation::Assignments;
